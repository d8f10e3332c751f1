//! Account use cases.

mod error;
mod record_login;
mod register_user;
mod set_user_active;

use std::sync::Arc;

pub use error::UserError;
pub use record_login::RecordLogin;
pub use register_user::RegisterUser;
pub use set_user_active::SetUserActive;

/// Container for account use cases.
pub struct UserUseCases {
    pub register: Arc<RegisterUser>,
    pub record_login: Arc<RecordLogin>,
    pub set_active: Arc<SetUserActive>,
}

impl UserUseCases {
    pub fn new(
        register: Arc<RegisterUser>,
        record_login: Arc<RecordLogin>,
        set_active: Arc<SetUserActive>,
    ) -> Self {
        Self {
            register,
            record_login,
            set_active,
        }
    }
}
