//! Resolve due hacks use case.
//!
//! Run periodically. Every in-progress hack whose completion time has passed
//! is rolled against its target's defenses and moved to `succeeded` or
//! `failed`. One hack failing to resolve does not stop the others.

use std::sync::Arc;

use netwatch_domain::{
    Computer, DomainError, HackOperation, HackResultData, HackStatus, HackType, Money, Player,
};
use serde::Serialize;
use serde_json::json;

use crate::infrastructure::ports::{
    ClockPort, ComputerRepo, DefenseRepo, HackOperationRepo, PlayerRepo, RandomPort,
};

use super::error::HackError;
use super::policy::{
    damage_for, defense_rating, roll_succeeds, success_chance, ROLL_MAX, ROLL_MIN,
    SKILL_POINTS_PER_LEVEL, STOLEN_MONEY_PERCENT, SUCCESS_EXPERIENCE,
};

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: usize,
}

impl ResolutionSummary {
    pub fn resolved(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// State changes produced by a successful hack, persisted together.
struct Consequences {
    attacker: Player,
    victim: Option<Player>,
    damaged_target: Option<Computer>,
}

pub struct ResolveDueHacks {
    hack_repo: Arc<dyn HackOperationRepo>,
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
    defense_repo: Arc<dyn DefenseRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl ResolveDueHacks {
    pub fn new(
        hack_repo: Arc<dyn HackOperationRepo>,
        player_repo: Arc<dyn PlayerRepo>,
        computer_repo: Arc<dyn ComputerRepo>,
        defense_repo: Arc<dyn DefenseRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            hack_repo,
            player_repo,
            computer_repo,
            defense_repo,
            clock,
            random,
        }
    }

    pub async fn execute(&self) -> Result<ResolutionSummary, HackError> {
        let now = self.clock.now();
        let due: Vec<HackOperation> = self
            .hack_repo
            .list_by_status(HackStatus::InProgress)
            .await?
            .into_iter()
            .filter(|hack| hack.is_ready(now))
            .collect();

        let mut summary = ResolutionSummary::default();
        for hack in due {
            let hack_id = hack.id().clone();
            match self.resolve(hack).await {
                Ok(resolved) if resolved.status() == HackStatus::Succeeded => {
                    summary.succeeded += 1
                }
                Ok(_) => summary.failed += 1,
                Err(e) => {
                    tracing::warn!(error = %e, hack_id = %hack_id, "Failed to resolve hack");
                    summary.errors += 1;
                }
            }
        }

        if summary.resolved() > 0 || summary.errors > 0 {
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                errors = summary.errors,
                "Resolved due hacks"
            );
        }
        Ok(summary)
    }

    async fn resolve(&self, hack: HackOperation) -> Result<HackOperation, HackError> {
        let Some(target) = self.computer_repo.get(hack.target_computer_id()).await? else {
            return self
                .finish(hack, HackStatus::Failed, failure_data("target_missing"))
                .await;
        };
        let Some(attacker) = self.player_repo.get(hack.attacker_id()).await? else {
            return self
                .finish(hack, HackStatus::Failed, failure_data("attacker_missing"))
                .await;
        };
        let victim = match hack.hack_type() {
            HackType::StealMoney => self.player_repo.get(target.owner_id()).await?,
            _ => None,
        };
        let defenses = self.defense_repo.list_for_computer(target.id()).await?;

        // No storage reads past this point: a rolled hack is always settled.
        let rating = defense_rating(&target, &defenses);
        let chance = success_chance(&target, &defenses);
        let roll = self.random.gen_range(ROLL_MIN, ROLL_MAX);

        let mut data = HackResultData::new();
        data.insert("roll".into(), json!(roll));
        data.insert("successChance".into(), json!(chance));
        data.insert("defenseRating".into(), json!(rating));

        if !roll_succeeds(chance, roll) {
            let reason = if target.is_vulnerable() {
                "defenses_held"
            } else {
                "target_unreachable"
            };
            data.insert("reason".into(), json!(reason));
            return self.finish(hack, HackStatus::Failed, data).await;
        }

        let effects = match consequences(&hack, attacker, victim, &target, &mut data) {
            Ok(effects) => effects,
            Err(e) => {
                tracing::warn!(error = %e, hack_id = %hack.id(), "Hack payout rejected");
                data.insert("reason".into(), json!("payout_rejected"));
                return self.finish(hack, HackStatus::Failed, data).await;
            }
        };
        let resolved = self.finish(hack, HackStatus::Succeeded, data).await?;

        // The terminal hack is written first so a retry never pays out twice,
        // and the victim is debited before the attacker is credited.
        if let Some(victim) = &effects.victim {
            self.player_repo.save(victim).await?;
        }
        self.player_repo.save(&effects.attacker).await?;
        if let Some(target) = &effects.damaged_target {
            self.computer_repo.save(target).await?;
        }
        Ok(resolved)
    }

    async fn finish(
        &self,
        hack: HackOperation,
        status: HackStatus,
        data: HackResultData,
    ) -> Result<HackOperation, HackError> {
        let resolved = hack.transition(status, Some(data))?;
        self.hack_repo.save(&resolved).await?;
        tracing::info!(
            hack_id = %resolved.id(),
            hack_type = %resolved.hack_type(),
            status = %status,
            "Hack resolved"
        );
        Ok(resolved)
    }
}

fn failure_data(reason: &str) -> HackResultData {
    let mut data = HackResultData::new();
    data.insert("reason".into(), json!(reason));
    data
}

fn consequences(
    hack: &HackOperation,
    attacker: Player,
    victim: Option<Player>,
    target: &Computer,
    data: &mut HackResultData,
) -> Result<Consequences, DomainError> {
    let attacker = reward(attacker, data)?;

    if hack.hack_type() == HackType::StealMoney {
        let stolen = victim
            .as_ref()
            .map_or(Money::zero(), |v| v.money().percentage(STOLEN_MONEY_PERCENT));
        data.insert("moneyStolen".into(), json!(stolen.value()));
        return Ok(Consequences {
            attacker: attacker.earn_money(stolen)?,
            victim: victim.map(|v| v.spend_money(stolen)).transpose()?,
            damaged_target: None,
        });
    }

    let damage = damage_for(hack.hack_type());
    data.insert(
        "damage".into(),
        json!({
            "storage": damage.storage,
            "cpu": damage.cpu,
            "memory": damage.memory,
        }),
    );
    Ok(Consequences {
        attacker,
        victim: None,
        damaged_target: Some(target.apply_damage(damage.storage, damage.cpu, damage.memory)),
    })
}

/// Experience for the hack, plus skill points for every level it crosses.
fn reward(attacker: Player, data: &mut HackResultData) -> Result<Player, DomainError> {
    let level_before = attacker.level();
    let attacker = attacker.gain_experience(SUCCESS_EXPERIENCE)?;
    data.insert("experienceGained".into(), json!(SUCCESS_EXPERIENCE));

    let levels_gained = attacker.level().saturating_sub(level_before);
    if levels_gained == 0 {
        return Ok(attacker);
    }
    let points = levels_gained.saturating_mul(SKILL_POINTS_PER_LEVEL);
    data.insert("skillPointsGained".into(), json!(points));
    attacker.add_skill_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ScriptedRandom;
    use crate::infrastructure::ports::{
        MockClockPort, MockComputerRepo, MockDefenseRepo, MockHackOperationRepo, MockPlayerRepo,
        RepoError,
    };
    use chrono::{DateTime, Duration, Utc};
    use mockall::Sequence;
    use netwatch_domain::{
        ComputerId, ComputerName, Defense, DefenseId, DefenseType, DisplayName, HackOperationId,
        IpAddress, PlayerId, ToolLoadout, UserId,
    };

    struct World {
        start: DateTime<Utc>,
        attacker: Player,
        victim: Player,
        target: Computer,
    }

    fn world() -> World {
        let start = Utc::now();
        let attacker = Player::create(
            PlayerId::new(),
            UserId::new(),
            DisplayName::new("crash_override").unwrap(),
            start,
        );
        let victim = Player::create(
            PlayerId::new(),
            UserId::new(),
            DisplayName::new("mark").unwrap(),
            start,
        )
        .earn_money(Money::new(1_005))
        .unwrap();
        let target = Computer::create(
            ComputerId::new(),
            victim.id().clone(),
            ComputerName::new("bank").unwrap(),
            IpAddress::in_private_range(10, 20, 30),
            start,
        );
        World {
            start,
            attacker,
            victim,
            target,
        }
    }

    fn running_hack(w: &World, hack_type: HackType) -> HackOperation {
        HackOperation::create(
            HackOperationId::new(),
            w.attacker.id().clone(),
            w.target.id().clone(),
            hack_type,
            ToolLoadout::new(vec!["metasploit".into()]),
            300,
            w.start,
        )
        .unwrap()
        .transition(HackStatus::InProgress, None)
        .unwrap()
    }

    fn clock_at(now: DateTime<Utc>) -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now);
        clock
    }

    fn hack_repo(hacks: Vec<HackOperation>, expected: HackStatus) -> MockHackOperationRepo {
        let mut repo = MockHackOperationRepo::new();
        repo.expect_list_by_status()
            .withf(|s| *s == HackStatus::InProgress)
            .returning(move |_| Ok(hacks.clone()));
        repo.expect_save()
            .withf(move |h| h.status() == expected && h.result_data().is_some())
            .returning(|_| Ok(()));
        repo
    }

    fn computer_repo(target: Computer) -> MockComputerRepo {
        let mut repo = MockComputerRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        repo
    }

    fn defense_repo(defenses: Vec<Defense>) -> MockDefenseRepo {
        let mut repo = MockDefenseRepo::new();
        repo.expect_list_for_computer()
            .returning(move |_| Ok(defenses.clone()));
        repo
    }

    fn player_repo(w: &World) -> MockPlayerRepo {
        let (attacker, victim) = (w.attacker.clone(), w.victim.clone());
        let mut repo = MockPlayerRepo::new();
        repo.expect_get().returning(move |id| {
            if id == attacker.id() {
                Ok(Some(attacker.clone()))
            } else if id == victim.id() {
                Ok(Some(victim.clone()))
            } else {
                Ok(None)
            }
        });
        repo
    }

    #[tokio::test]
    async fn hacks_not_yet_due_are_left_alone() {
        let w = world();
        let hack = running_hack(&w, HackType::Ddos);
        let mut hacks = MockHackOperationRepo::new();
        hacks
            .expect_list_by_status()
            .returning(move |_| Ok(vec![hack.clone()]));
        hacks.expect_save().never();

        let summary = ResolveDueHacks::new(
            Arc::new(hacks),
            Arc::new(MockPlayerRepo::new()),
            Arc::new(MockComputerRepo::new()),
            Arc::new(MockDefenseRepo::new()),
            Arc::new(clock_at(w.start + Duration::seconds(299))),
            Arc::new(ScriptedRandom::new([])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary, ResolutionSummary::default());
    }

    #[tokio::test]
    async fn successful_theft_moves_ten_percent() {
        let w = world();
        let hack = running_hack(&w, HackType::StealMoney);
        let (attacker_id, victim_id) = (w.attacker.id().clone(), w.victim.id().clone());

        let mut players = player_repo(&w);
        let mut seq = Sequence::new();
        players
            .expect_save()
            .withf(move |p| p.id() == &victim_id && p.money() == Money::new(905))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        players
            .expect_save()
            .withf(move |p| {
                p.id() == &attacker_id && p.money() == Money::new(100) && p.experience() == 50
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let summary = ResolveDueHacks::new(
            Arc::new(hack_repo(vec![hack], HackStatus::Succeeded)),
            Arc::new(players),
            Arc::new(computer_repo(w.target.clone())),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([100])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.resolved(), 1);
    }

    #[tokio::test]
    async fn successful_ddos_damages_cpu() {
        let w = world();
        let hack = running_hack(&w, HackType::Ddos);

        let mut players = player_repo(&w);
        players.expect_save().times(1).returning(|_| Ok(()));
        let mut computers = computer_repo(w.target.clone());
        computers
            .expect_save()
            .withf(|c| c.cpu() == 75 && c.storage() == 1000)
            .times(1)
            .returning(|_| Ok(()));

        let summary = ResolveDueHacks::new(
            Arc::new(hack_repo(vec![hack], HackStatus::Succeeded)),
            Arc::new(players),
            Arc::new(computers),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(301))),
            Arc::new(ScriptedRandom::new([1])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.succeeded, 1);
    }

    #[tokio::test]
    async fn defenses_can_hold() {
        let w = world();
        let hack = running_hack(&w, HackType::StealData);
        let target = w.target.upgrade_firewall(40);
        let ids = Defense::create(DefenseId::new(), target.id().clone(), DefenseType::Ids, w.start);

        // firewall 40 + IDS level 1 (20) -> rating 30, chance 70
        let summary = ResolveDueHacks::new(
            Arc::new(hack_repo(vec![hack], HackStatus::Failed)),
            Arc::new(player_repo(&w)),
            Arc::new(computer_repo(target)),
            Arc::new(defense_repo(vec![ids])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([71])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 0);
    }

    #[tokio::test]
    async fn offline_target_always_fails() {
        let w = world();
        let hack = running_hack(&w, HackType::Ddos);

        let summary = ResolveDueHacks::new(
            Arc::new(hack_repo(vec![hack], HackStatus::Failed)),
            Arc::new(player_repo(&w)),
            Arc::new(computer_repo(w.target.go_offline())),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([1])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn vanished_target_fails_the_hack() {
        let w = world();
        let hack = running_hack(&w, HackType::InstallVirus);
        let mut computers = MockComputerRepo::new();
        computers.expect_get().returning(|_| Ok(None));

        let summary = ResolveDueHacks::new(
            Arc::new(hack_repo(vec![hack], HackStatus::Failed)),
            Arc::new(MockPlayerRepo::new()),
            Arc::new(computers),
            Arc::new(MockDefenseRepo::new()),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn vanished_attacker_fails_the_hack_without_rolling() {
        let w = world();
        let hack = running_hack(&w, HackType::Ddos);
        let mut hacks = MockHackOperationRepo::new();
        hacks
            .expect_list_by_status()
            .returning(move |_| Ok(vec![hack.clone()]));
        hacks
            .expect_save()
            .withf(|h| {
                h.status() == HackStatus::Failed
                    && h.result_data().map(|d| d["reason"] == "attacker_missing") == Some(true)
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut players = MockPlayerRepo::new();
        players.expect_get().returning(|_| Ok(None));
        players.expect_save().never();

        let summary = ResolveDueHacks::new(
            Arc::new(hacks),
            Arc::new(players),
            Arc::new(computer_repo(w.target.clone())),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 0);
    }

    #[tokio::test]
    async fn defense_lookup_failure_leaves_the_hack_unrolled() {
        let w = world();
        let hack = running_hack(&w, HackType::StealData);
        let mut hacks = MockHackOperationRepo::new();
        hacks
            .expect_list_by_status()
            .returning(move |_| Ok(vec![hack.clone()]));
        hacks.expect_save().never();
        let mut defenses = MockDefenseRepo::new();
        defenses
            .expect_list_for_computer()
            .returning(|_| Err(RepoError::database("list", "timeout")));
        let random = Arc::new(ScriptedRandom::new([1]));

        let summary = ResolveDueHacks::new(
            Arc::new(hacks),
            Arc::new(player_repo(&w)),
            Arc::new(computer_repo(w.target.clone())),
            Arc::new(defenses),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            random.clone(),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.errors, 1);
        // The scripted roll is still queued for the next pass.
        assert_eq!(random.gen_range(ROLL_MIN, ROLL_MAX), 1);
    }

    #[tokio::test]
    async fn levelling_up_grants_a_skill_point() {
        let mut w = world();
        w.attacker = w.attacker.gain_experience(50).unwrap();
        let hack = running_hack(&w, HackType::Ddos);

        let mut players = player_repo(&w);
        players
            .expect_save()
            .withf(|p| p.experience() == 100 && p.level() == 1 && p.skill_points() == 1)
            .times(1)
            .returning(|_| Ok(()));
        let mut computers = computer_repo(w.target.clone());
        computers.expect_save().times(1).returning(|_| Ok(()));
        let mut hacks = MockHackOperationRepo::new();
        let listed = hack.clone();
        hacks
            .expect_list_by_status()
            .returning(move |_| Ok(vec![listed.clone()]));
        hacks
            .expect_save()
            .withf(|h| h.result_data().map(|d| d["skillPointsGained"] == 1) == Some(true))
            .times(1)
            .returning(|_| Ok(()));

        let summary = ResolveDueHacks::new(
            Arc::new(hacks),
            Arc::new(players),
            Arc::new(computers),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([10])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.succeeded, 1);
    }

    #[tokio::test]
    async fn one_broken_hack_does_not_block_the_rest() {
        let w = world();
        let broken = running_hack(&w, HackType::Ddos);
        let healthy = running_hack(&w, HackType::Ddos);
        let (broken_id, healthy_id) = (broken.id().clone(), healthy.id().clone());

        let mut hacks = MockHackOperationRepo::new();
        hacks
            .expect_list_by_status()
            .returning(move |_| Ok(vec![broken.clone(), healthy.clone()]));
        hacks
            .expect_save()
            .withf(move |h| h.id() == &healthy_id)
            .times(1)
            .returning(|_| Ok(()));
        hacks
            .expect_save()
            .withf(move |h| h.id() == &broken_id)
            .times(1)
            .returning(|_| Err(RepoError::database("save", "connection reset")));

        let mut computers = MockComputerRepo::new();
        let target = w.target.clone();
        computers
            .expect_get()
            .returning(move |_| Ok(Some(target.go_offline())));

        let summary = ResolveDueHacks::new(
            Arc::new(hacks),
            Arc::new(player_repo(&w)),
            Arc::new(computers),
            Arc::new(defense_repo(vec![])),
            Arc::new(clock_at(w.start + Duration::seconds(300))),
            Arc::new(ScriptedRandom::new([])),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.failed, 1);
    }
}
