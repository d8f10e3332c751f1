//! HackOperation aggregate - a time-boxed attack against a target computer
//!
//! The only aggregate with an explicit lifecycle:
//!
//! ```text
//! pending ──► in_progress ──► succeeded
//!    │             │      └─► failed
//!    └──► aborted ◄┘
//! ```
//!
//! `succeeded`, `failed` and `aborted` are terminal. Which outcome a hack
//! produces is decided by the application layer; this type only enforces
//! which moves are legal and when a hack becomes due.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ComputerId, HackOperationId, PlayerId};

/// Opaque outcome payload attached when a hack resolves.
pub type HackResultData = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle state of a hack operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Aborted,
}

impl HackStatus {
    pub fn all() -> [Self; 5] {
        [
            Self::Pending,
            Self::InProgress,
            Self::Succeeded,
            Self::Failed,
            Self::Aborted,
        ]
    }

    /// States reachable in one step from this one.
    pub fn allowed_transitions(&self) -> &'static [HackStatus] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Aborted],
            Self::InProgress => &[Self::Succeeded, Self::Failed, Self::Aborted],
            Self::Succeeded | Self::Failed | Self::Aborted => &[],
        }
    }

    pub fn can_transition_to(&self, to: HackStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl std::fmt::Display for HackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HackStatus::Pending => write!(f, "pending"),
            HackStatus::InProgress => write!(f, "in_progress"),
            HackStatus::Succeeded => write!(f, "succeeded"),
            HackStatus::Failed => write!(f, "failed"),
            HackStatus::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::str::FromStr for HackStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(HackStatus::Pending),
            "in_progress" => Ok(HackStatus::InProgress),
            "succeeded" => Ok(HackStatus::Succeeded),
            "failed" => Ok(HackStatus::Failed),
            "aborted" => Ok(HackStatus::Aborted),
            _ => Err(DomainError::parse(format!("Invalid hack status: {}", s))),
        }
    }
}

// ============================================================================
// Hack type
// ============================================================================

/// What the attacker is trying to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackType {
    StealMoney,
    StealData,
    InstallVirus,
    Ddos,
}

impl std::fmt::Display for HackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HackType::StealMoney => write!(f, "steal_money"),
            HackType::StealData => write!(f, "steal_data"),
            HackType::InstallVirus => write!(f, "install_virus"),
            HackType::Ddos => write!(f, "ddos"),
        }
    }
}

impl std::str::FromStr for HackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steal_money" => Ok(HackType::StealMoney),
            "steal_data" => Ok(HackType::StealData),
            "install_virus" => Ok(HackType::InstallVirus),
            "ddos" => Ok(HackType::Ddos),
            _ => Err(DomainError::parse(format!("Invalid hack type: {}", s))),
        }
    }
}

// ============================================================================
// Tools
// ============================================================================

/// Tools used in an attack.
///
/// Order is preserved for auditing, but two loadouts with the same tools in a
/// different order compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolLoadout(Vec<String>);

impl ToolLoadout {
    pub fn new(tools: Vec<String>) -> Self {
        Self(tools)
    }

    /// Tools in the order they were supplied.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn sorted(&self) -> Vec<&String> {
        let mut tools: Vec<&String> = self.0.iter().collect();
        tools.sort();
        tools
    }
}

impl PartialEq for ToolLoadout {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for ToolLoadout {}

impl From<Vec<String>> for ToolLoadout {
    fn from(tools: Vec<String>) -> Self {
        Self(tools)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// An attack in flight or resolved.
///
/// # Invariants
///
/// - `estimated_duration_secs > 0`
/// - `completion_at > started_at`
/// - once terminal, no further transitions succeed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HackOperationRecord", into = "HackOperationRecord")]
pub struct HackOperation {
    id: HackOperationId,
    attacker_id: PlayerId,
    target_computer_id: ComputerId,
    status: HackStatus,
    hack_type: HackType,
    tools_used: ToolLoadout,
    estimated_duration_secs: u32,
    started_at: DateTime<Utc>,
    completion_at: DateTime<Utc>,
    result_data: Option<HackResultData>,
}

impl HackOperation {
    /// Start a new operation in `pending`, due `estimated_duration_secs` after `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the duration is zero, or if the
    /// attacker id string equals the target computer id string, and
    /// `DomainError::Overflow` if the completion time is not representable.
    ///
    /// The id comparison crosses id spaces (player vs. computer), so it does
    /// not catch an owner attacking their own machine. `InitiateHack` in the
    /// engine compares the attacker with the target's owner for that.
    pub fn create(
        id: HackOperationId,
        attacker_id: PlayerId,
        target_computer_id: ComputerId,
        hack_type: HackType,
        tools_used: ToolLoadout,
        estimated_duration_secs: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let completion_at = now
            .checked_add_signed(Duration::seconds(i64::from(estimated_duration_secs)))
            .ok_or_else(|| DomainError::overflow("Completion time is out of range"))?;
        Self::validated(Self {
            id,
            attacker_id,
            target_computer_id,
            status: HackStatus::Pending,
            hack_type,
            tools_used,
            estimated_duration_secs,
            started_at: now,
            completion_at,
            result_data: None,
        })
    }

    fn validated(hack: Self) -> Result<Self, DomainError> {
        if hack.estimated_duration_secs == 0 {
            return Err(DomainError::validation(
                "Estimated duration must be positive",
            ));
        }
        if hack.completion_at <= hack.started_at {
            return Err(DomainError::validation(
                "Completion time must be after start time",
            ));
        }
        if hack.attacker_id.as_str() == hack.target_computer_id.as_str() {
            return Err(DomainError::validation("Cannot hack own computer"));
        }
        Ok(hack)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn id(&self) -> &HackOperationId {
        &self.id
    }

    pub fn attacker_id(&self) -> &PlayerId {
        &self.attacker_id
    }

    pub fn target_computer_id(&self) -> &ComputerId {
        &self.target_computer_id
    }

    pub fn status(&self) -> HackStatus {
        self.status
    }

    pub fn hack_type(&self) -> HackType {
        self.hack_type
    }

    pub fn tools_used(&self) -> &ToolLoadout {
        &self.tools_used
    }

    pub fn estimated_duration_secs(&self) -> u32 {
        self.estimated_duration_secs
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completion_at(&self) -> DateTime<Utc> {
        self.completion_at
    }

    pub fn result_data(&self) -> Option<&HackResultData> {
        self.result_data.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// True once `now` has reached the scheduled completion time.
    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        now >= self.completion_at
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Move to `to`, replacing result data only when new data is supplied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if `to` is not reachable from
    /// the current status.
    pub fn transition(
        &self,
        to: HackStatus,
        result_data: Option<HackResultData>,
    ) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::invalid_transition(self.status, to));
        }
        Ok(Self {
            status: to,
            result_data: result_data.or_else(|| self.result_data.clone()),
            ..self.clone()
        })
    }
}

// ============================================================================
// Storage snapshot
// ============================================================================

/// Flat snapshot of a [`HackOperation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackOperationRecord {
    pub id: String,
    pub attacker_id: String,
    pub target_computer_id: String,
    pub status: HackStatus,
    pub hack_type: HackType,
    pub tools_used: Vec<String>,
    pub estimated_duration: u32,
    pub started_at: DateTime<Utc>,
    pub completion_at: DateTime<Utc>,
    pub result_data: Option<HackResultData>,
}

impl TryFrom<HackOperationRecord> for HackOperation {
    type Error = DomainError;

    fn try_from(record: HackOperationRecord) -> Result<Self, Self::Error> {
        Self::validated(Self {
            id: HackOperationId::parse(record.id)?,
            attacker_id: PlayerId::parse(record.attacker_id)?,
            target_computer_id: ComputerId::parse(record.target_computer_id)?,
            status: record.status,
            hack_type: record.hack_type,
            tools_used: ToolLoadout::new(record.tools_used),
            estimated_duration_secs: record.estimated_duration,
            started_at: record.started_at,
            completion_at: record.completion_at,
            result_data: record.result_data,
        })
    }
}

impl From<HackOperation> for HackOperationRecord {
    fn from(hack: HackOperation) -> Self {
        Self {
            id: hack.id.into(),
            attacker_id: hack.attacker_id.into(),
            target_computer_id: hack.target_computer_id.into(),
            status: hack.status,
            hack_type: hack.hack_type,
            tools_used: hack.tools_used.0,
            estimated_duration: hack.estimated_duration_secs,
            started_at: hack.started_at,
            completion_at: hack.completion_at,
            result_data: hack.result_data,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 23, 12, 0, 0).unwrap()
    }

    fn create_test_hack() -> HackOperation {
        HackOperation::create(
            HackOperationId::new(),
            PlayerId::new(),
            ComputerId::new(),
            HackType::StealMoney,
            ToolLoadout::new(vec!["nmap".into(), "hydra".into()]),
            300,
            t0(),
        )
        .unwrap()
    }

    fn in_state(status: HackStatus) -> HackOperation {
        let mut record = HackOperationRecord::from(create_test_hack());
        record.status = status;
        HackOperation::try_from(record).unwrap()
    }

    fn result(key: &str) -> HackResultData {
        let mut data = HackResultData::new();
        data.insert(key.to_string(), json!(true));
        data
    }

    mod creation {
        use super::*;

        #[test]
        fn starts_pending_with_derived_completion() {
            let hack = create_test_hack();
            assert_eq!(hack.status(), HackStatus::Pending);
            assert_eq!(hack.started_at(), t0());
            assert_eq!(hack.completion_at(), t0() + Duration::seconds(300));
            assert!(hack.result_data().is_none());
        }

        #[test]
        fn rejects_zero_duration() {
            let result = HackOperation::create(
                HackOperationId::new(),
                PlayerId::new(),
                ComputerId::new(),
                HackType::Ddos,
                ToolLoadout::default(),
                0,
                t0(),
            );
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn completion_past_the_end_of_time_is_an_overflow() {
            let result = HackOperation::create(
                HackOperationId::new(),
                PlayerId::new(),
                ComputerId::new(),
                HackType::Ddos,
                ToolLoadout::default(),
                1,
                DateTime::<Utc>::MAX_UTC,
            );
            assert!(matches!(result, Err(DomainError::Overflow(_))));
        }

        #[test]
        fn self_hack_check_compares_raw_id_strings() {
            // Player and computer ids live in different spaces, so an owner
            // targeting their own machine passes this check. The ownership
            // guard lives in the InitiateHack use case.
            let owner = PlayerId::new();
            let own_computer = ComputerId::new();
            let hack = HackOperation::create(
                HackOperationId::new(),
                owner,
                own_computer,
                HackType::StealData,
                ToolLoadout::default(),
                60,
                t0(),
            );
            assert!(hack.is_ok());

            // Only an identical string trips it.
            let clash = HackOperation::create(
                HackOperationId::new(),
                PlayerId::parse("shared-id").unwrap(),
                ComputerId::parse("shared-id").unwrap(),
                HackType::StealData,
                ToolLoadout::default(),
                60,
                t0(),
            );
            assert_eq!(
                clash.unwrap_err(),
                DomainError::validation("Cannot hack own computer")
            );
        }

        #[test]
        fn record_rejects_completion_not_after_start() {
            let mut record = HackOperationRecord::from(create_test_hack());
            record.completion_at = record.started_at;
            assert!(HackOperation::try_from(record).is_err());
        }
    }

    mod readiness {
        use super::*;

        #[test]
        fn ready_exactly_at_completion() {
            let hack = create_test_hack();
            assert!(!hack.is_ready(t0()));
            assert!(!hack.is_ready(t0() + Duration::seconds(299)));
            assert!(hack.is_ready(t0() + Duration::seconds(300)));
            assert!(hack.is_ready(t0() + Duration::hours(1)));
        }
    }

    mod transitions {
        use super::*;

        const ALLOWED: [(HackStatus, HackStatus); 5] = [
            (HackStatus::Pending, HackStatus::InProgress),
            (HackStatus::Pending, HackStatus::Aborted),
            (HackStatus::InProgress, HackStatus::Succeeded),
            (HackStatus::InProgress, HackStatus::Failed),
            (HackStatus::InProgress, HackStatus::Aborted),
        ];

        #[test]
        fn table_is_exhaustive() {
            for from in HackStatus::all() {
                for to in HackStatus::all() {
                    let hack = in_state(from);
                    let outcome = hack.transition(to, None);
                    if ALLOWED.contains(&(from, to)) {
                        assert_eq!(outcome.unwrap().status(), to, "{from} -> {to}");
                    } else {
                        assert_eq!(
                            outcome.unwrap_err(),
                            DomainError::invalid_transition(from, to),
                            "{from} -> {to}"
                        );
                    }
                }
            }
        }

        #[test]
        fn terminal_states_have_no_exits() {
            for status in [HackStatus::Succeeded, HackStatus::Failed, HackStatus::Aborted] {
                assert!(status.is_terminal());
                assert!(in_state(status).is_terminal());
            }
            assert!(!HackStatus::Pending.is_terminal());
            assert!(!HackStatus::InProgress.is_terminal());
        }

        #[test]
        fn transition_returns_new_value() {
            let hack = create_test_hack();
            let started = hack.transition(HackStatus::InProgress, None).unwrap();
            assert_eq!(hack.status(), HackStatus::Pending);
            assert_eq!(started.status(), HackStatus::InProgress);
        }

        #[test]
        fn transition_without_data_keeps_previous_result() {
            let started = create_test_hack()
                .transition(HackStatus::InProgress, Some(result("scan")))
                .unwrap();
            let aborted = started.transition(HackStatus::Aborted, None).unwrap();
            assert_eq!(aborted.result_data(), Some(&result("scan")));

            let replaced = started
                .transition(HackStatus::Succeeded, Some(result("loot")))
                .unwrap();
            assert_eq!(replaced.result_data(), Some(&result("loot")));
        }
    }

    mod tools {
        use super::*;

        #[test]
        fn equality_ignores_order_but_slice_keeps_it() {
            let a = ToolLoadout::new(vec!["nmap".into(), "hydra".into()]);
            let b = ToolLoadout::new(vec!["hydra".into(), "nmap".into()]);
            assert_eq!(a, b);
            assert_eq!(a.as_slice()[0], "nmap");
            assert_ne!(a, ToolLoadout::new(vec!["nmap".into()]));
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn snapshot_uses_wire_names() {
            let hack = create_test_hack()
                .transition(HackStatus::InProgress, None)
                .unwrap();
            let json = serde_json::to_value(&hack).unwrap();
            assert_eq!(json["status"], "in_progress");
            assert_eq!(json["hackType"], "steal_money");
            assert_eq!(json["estimatedDuration"], 300);
            assert_eq!(json["toolsUsed"], json!(["nmap", "hydra"]));

            let back: HackOperation = serde_json::from_value(json).unwrap();
            assert_eq!(back, hack);
        }
    }
}
