//! IP address allocation for new computers.
//!
//! Addresses are sampled from `10.[1-255].[1-255].[1-255]` and checked against
//! an existence oracle supplied by the caller. Randomness is injected as a
//! closure so the domain stays free of RNG dependencies.
//!
//! Allocation is check-then-act: two concurrent callers can draw the same free
//! address. The persistence layer's uniqueness constraint is the final
//! arbiter; a rejected write should be retried with a fresh allocation.

use crate::error::DomainError;
use crate::value_objects::IpAddress;

/// Upper bound on candidates checked per allocation.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 100;

/// Lowest octet value sampled (0 is avoided for readability).
pub const MIN_OCTET: u8 = 1;
pub const MAX_OCTET: u8 = 255;

/// Yields at most [`MAX_ALLOCATION_ATTEMPTS`] candidate addresses.
///
/// `sample(min, max)` must return a value in `min..=max`; it is called three
/// times per candidate, for the second, third and fourth octet in that order.
pub fn candidate_addresses<F>(mut sample: F) -> impl Iterator<Item = IpAddress>
where
    F: FnMut(u8, u8) -> u8,
{
    (0..MAX_ALLOCATION_ATTEMPTS).map(move |_| {
        let b = sample(MIN_OCTET, MAX_OCTET);
        let c = sample(MIN_OCTET, MAX_OCTET);
        let d = sample(MIN_OCTET, MAX_OCTET);
        IpAddress::in_private_range(b, c, d)
    })
}

/// Allocates the first candidate the oracle reports as free.
///
/// # Errors
///
/// Returns `DomainError::AddressSpaceExhausted` once all
/// [`MAX_ALLOCATION_ATTEMPTS`] candidates were taken. This is an operational
/// condition for the caller to surface, not something to retry in a loop.
pub fn allocate_ip_address<F, G>(sample: F, mut is_taken: G) -> Result<IpAddress, DomainError>
where
    F: FnMut(u8, u8) -> u8,
    G: FnMut(&IpAddress) -> bool,
{
    candidate_addresses(sample)
        .find(|candidate| !is_taken(candidate))
        .ok_or(DomainError::AddressSpaceExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
}
