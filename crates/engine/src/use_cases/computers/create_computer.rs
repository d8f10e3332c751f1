//! Create computer use case.
//!
//! Draws a free `10.x.y.z` address and persists the machine. Allocation is
//! check-then-act, so a concurrent creation can claim the same address between
//! the check and the write; the repo's uniqueness constraint catches that and
//! the whole allocation is retried.

use std::sync::Arc;

use netwatch_domain::{
    candidate_addresses, Computer, ComputerId, ComputerName, DomainError, IpAddress, PlayerId,
    MAX_ALLOCATION_ATTEMPTS,
};

use crate::infrastructure::ports::{ClockPort, ComputerRepo, PlayerRepo, RandomPort};

use super::error::ComputerError;

pub struct CreateComputer {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    max_attempts: u32,
}

impl CreateComputer {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        computer_repo: Arc<dyn ComputerRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        max_attempts: u32,
    ) -> Self {
        Self {
            player_repo,
            computer_repo,
            clock,
            random,
            max_attempts,
        }
    }

    pub async fn execute(
        &self,
        owner_id: &PlayerId,
        name: &str,
    ) -> Result<Computer, ComputerError> {
        if self.player_repo.get(owner_id).await?.is_none() {
            return Err(ComputerError::PlayerNotFound(owner_id.clone()));
        }
        let name = ComputerName::new(name)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let ip = self.allocate_ip().await?;
            let computer = Computer::create(
                ComputerId::from_uuid(self.random.gen_uuid()),
                owner_id.clone(),
                name.clone(),
                ip,
                self.clock.now(),
            );

            match self.computer_repo.save(&computer).await {
                Ok(()) => {
                    tracing::info!(
                        computer_id = %computer.id(),
                        owner_id = %owner_id,
                        ip = %ip,
                        "Computer created"
                    );
                    return Ok(computer);
                }
                Err(e) if e.is_constraint_violation() && attempt < self.max_attempts => {
                    tracing::warn!(ip = %ip, attempt, "IP address claimed concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn allocate_ip(&self) -> Result<IpAddress, ComputerError> {
        let random = self.random.as_ref();
        let candidates = candidate_addresses(|min, max| sample_octet(random, min, max));

        for candidate in candidates {
            if !self.computer_repo.ip_address_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        tracing::error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "IP address space exhausted"
        );
        Err(DomainError::AddressSpaceExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        }
        .into())
    }
}

fn sample_octet(random: &dyn RandomPort, min: u8, max: u8) -> u8 {
    let value = random
        .gen_range(i32::from(min), i32::from(max))
        .clamp(i32::from(min), i32::from(max));
    u8::try_from(value).unwrap_or(max)
}
