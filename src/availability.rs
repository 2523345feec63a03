//! Wire models for the booking API and the per-center availability decision.

use std::fmt;

use serde::Deserialize;

/// Envelope of `GET /booking/{name}.json`.
#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub data: BookingData,
}

#[derive(Debug, Deserialize)]
pub struct BookingData {
    pub profile: Profile,
    pub agendas: Vec<Agenda>,
    pub visit_motives: Vec<VisitMotive>,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub id: i64,
}

/// A bookable calendar at a center.
#[derive(Debug, Deserialize)]
pub struct Agenda {
    pub id: i64,
    pub booking_disabled: bool,
}

/// An appointment type offered by a center.
#[derive(Debug, Deserialize)]
pub struct VisitMotive {
    pub id: i64,
    pub name: String,
}

/// `GET /availabilities.json` — only the aggregate count is used.
#[derive(Debug, Deserialize)]
pub struct AvailabilitiesResponse {
    pub total: u32,
}

/// Everything needed to query availabilities for one center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Stable profile id; also the ledger key for debouncing.
    pub profile_id: String,
    pub visit_motive_id: i64,
    /// Open-agenda ids joined with `-`, as the API expects.
    pub agenda_ids: String,
}

/// Non-fatal reasons to pass over a center this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoOpenAgendas,
    NoMatchingMotive,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoOpenAgendas => write!(f, "no open agendas"),
            SkipReason::NoMatchingMotive => write!(f, "no matching visit motive"),
        }
    }
}

/// Outcome of evaluating one center's detail response. Callers must handle
/// both arms; skipping is a normal result, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum Evaluation {
    Query(AvailabilityQuery),
    Skip(SkipReason),
}

/// Decide whether a center is worth an availabilities query.
///
/// The motive rule keeps its historical operator precedence: the "moderna"
/// arm matches on its own, while the leading-digit check only gates the
/// "pfizer" arm.
pub fn evaluate(data: &BookingData) -> Evaluation {
    let open: Vec<&Agenda> = data
        .agendas
        .iter()
        .filter(|a| !a.booking_disabled)
        .collect();
    if open.is_empty() {
        return Evaluation::Skip(SkipReason::NoOpenAgendas);
    }

    let motive = data.visit_motives.iter().find(|v| {
        let lower = v.name.to_lowercase();
        (v.name.starts_with('1') && lower.contains("pfizer")) || lower.contains("moderna")
    });
    let Some(motive) = motive else {
        return Evaluation::Skip(SkipReason::NoMatchingMotive);
    };

    let agenda_ids = open
        .iter()
        .map(|a| a.id.to_string())
        .collect::<Vec<_>>()
        .join("-");

    Evaluation::Query(AvailabilityQuery {
        profile_id: data.profile.id.to_string(),
        visit_motive_id: motive.id,
        agenda_ids,
    })
}
