use clap::Args;
use enroll_app::domain::{
    checkout::{GuestIdentity, UserIdentity},
    users::UserId,
};

/// Buyer identity. Without `--user-id` the buyer checks out as a guest.
#[derive(Debug, Args)]
pub(crate) struct BuyerArgs {
    /// Account id of an authenticated buyer
    #[arg(long)]
    user_id: Option<String>,

    /// Buyer display name
    #[arg(long)]
    name: String,

    /// Buyer email
    #[arg(long)]
    email: String,

    /// Buyer phone number
    #[arg(long)]
    phone: Option<String>,
}

impl BuyerArgs {
    pub(crate) fn into_identity(self) -> Result<UserIdentity, String> {
        if self.email.trim().is_empty() {
            return Err("email cannot be empty".to_string());
        }

        Ok(match self.user_id {
            Some(user_id) if !user_id.trim().is_empty() => UserIdentity::Account {
                user_id: UserId::new(user_id.trim()),
                name: self.name,
                email: self.email,
                phone: self.phone,
            },
            _ => UserIdentity::Guest(GuestIdentity {
                name: self.name,
                email: self.email,
                phone: self.phone,
            }),
        })
    }
}
