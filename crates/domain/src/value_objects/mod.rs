//! Value objects: immutable types defined entirely by their value.

mod energy;
mod ip_address;
mod money;
mod names;

pub use energy::Energy;
pub use ip_address::IpAddress;
pub use money::Money;
pub use names::{ComputerName, DisplayName, Email, PasswordHash, UnlockKey, Username};
