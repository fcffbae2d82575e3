use crate::errors::{ChronicleError, Result};
use crate::model::{Event, HistoricalDate, Period, Relationship, StandardRelation};

/// A relationship endpoint already resolved to a dated component
///
/// Relationships never point at other relationships or timelines, so an
/// endpoint is always an event or a period by the time the rulebook runs.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    Event(&'a Event),
    Period(&'a Period),
}

impl<'a> Endpoint<'a> {
    pub fn id(&self) -> &str {
        match self {
            Endpoint::Event(e) => &e.id,
            Endpoint::Period(p) => &p.id,
        }
    }

    /// First moment of the endpoint: an event's date, a period's start
    fn start(&self) -> &HistoricalDate {
        match self {
            Endpoint::Event(e) => &e.date,
            Endpoint::Period(p) => &p.start,
        }
    }

    /// Last moment of the endpoint: an event's date, a period's end
    fn end(&self) -> &HistoricalDate {
        match self {
            Endpoint::Event(e) => &e.date,
            Endpoint::Period(p) => &p.end,
        }
    }
}

/// Check one standard relationship against its temporal rule
///
/// Custom relation types carry no temporal semantics and never reach this
/// function. Each standard rule compares the endpoints' dates exactly as
/// the language defines them; any failure is a `RelationRuleViolation`
/// naming the rule and the offending comparison.
///
/// # Errors
/// * `RelationRuleViolation` - the endpoints' dates break the rule
pub fn check_relation(
    rel: &Relationship,
    relation: StandardRelation,
    from: Endpoint<'_>,
    to: Endpoint<'_>,
) -> Result<()> {
    match relation {
        StandardRelation::CauseEffect => check_cause_effect(rel, from, to),
        StandardRelation::Precedes => check_precedes(rel, from, to),
        StandardRelation::Follows => check_follows(rel, from, to),
        StandardRelation::Contemporaneous => check_contemporaneous(rel, from, to),
        StandardRelation::Includes => check_includes(rel, from, to),
        StandardRelation::Excludes => check_excludes(rel, from, to),
    }
}

fn violation(
    rel: &Relationship,
    relation: StandardRelation,
    from: Endpoint<'_>,
    to: Endpoint<'_>,
    detail: String,
) -> ChronicleError {
    ChronicleError::RelationRuleViolation {
        relationship_id: rel.id.clone(),
        from_id: from.id().to_string(),
        to_id: to.id().to_string(),
        rule: relation.as_str().to_string(),
        detail,
    }
}

/// The cause must come strictly before the effect
///
/// The anchor points differ by endpoint shape: a cause period is anchored
/// at its start, an effect period at its start when the cause is a period
/// but at its end when the cause is an event.
fn check_cause_effect(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    let rule = StandardRelation::CauseEffect;
    match (from, to) {
        (Endpoint::Event(a), Endpoint::Event(b)) => {
            if !(a.date < b.date) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!("cause '{}' must be earlier than effect '{}'", a.id, b.id),
                ));
            }
        }
        (Endpoint::Period(a), Endpoint::Event(b)) => {
            if !(a.start < b.date) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!("cause period '{}' must start before effect '{}'", a.id, b.id),
                ));
            }
        }
        (Endpoint::Period(a), Endpoint::Period(b)) => {
            if !(a.start < b.start) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "cause period '{}' must start before effect period '{}'",
                        a.id, b.id
                    ),
                ));
            }
        }
        (Endpoint::Event(a), Endpoint::Period(b)) => {
            if !(a.date < b.end) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "cause '{}' must be earlier than the end of effect period '{}'",
                        a.id, b.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// 'from' must be wholly before 'to': end of from < start of to
fn check_precedes(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    if !(from.end() < to.start()) {
        return Err(violation(
            rel,
            StandardRelation::Precedes,
            from,
            to,
            format!("'{}' must be before '{}'", from.id(), to.id()),
        ));
    }
    Ok(())
}

/// Mirror of PRECEDES: 'to' must be wholly before 'from'
fn check_follows(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    if !(to.end() < from.start()) {
        return Err(violation(
            rel,
            StandardRelation::Follows,
            from,
            to,
            format!("'{}' must be before '{}'", to.id(), from.id()),
        ));
    }
    Ok(())
}

/// The endpoints must share time: equal dates, overlapping periods, or an
/// event falling inside the period
fn check_contemporaneous(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    let rule = StandardRelation::Contemporaneous;
    match (from, to) {
        (Endpoint::Event(a), Endpoint::Event(b)) => {
            if a.date != b.date {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!("events '{}' and '{}' must occur at the same time", a.id, b.id),
                ));
            }
        }
        (Endpoint::Period(a), Endpoint::Period(b)) => {
            if !(a.start <= b.end && b.start <= a.end) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!("periods '{}' and '{}' must overlap", a.id, b.id),
                ));
            }
        }
        (Endpoint::Event(event), Endpoint::Period(period))
        | (Endpoint::Period(period), Endpoint::Event(event)) => {
            if !(period.start <= event.date && event.date <= period.end) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "event '{}' must occur during period '{}'",
                        event.id, period.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// The 'from' period must contain the 'to' component entirely
fn check_includes(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    let rule = StandardRelation::Includes;
    let Endpoint::Period(container) = from else {
        // Construction already rejects a non-period 'from'
        return Err(ChronicleError::IncludesRequiresPeriod {
            relationship_id: rel.id.clone(),
            from_id: from.id().to_string(),
        });
    };
    match to {
        Endpoint::Event(b) => {
            if !(container.start <= b.date && b.date <= container.end) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "event '{}' must occur within period '{}'",
                        b.id, container.id
                    ),
                ));
            }
        }
        Endpoint::Period(b) => {
            if !(container.start <= b.start && b.end <= container.end) {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "period '{}' must be entirely within period '{}'",
                        b.id, container.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// The endpoints must share no time at all
fn check_excludes(rel: &Relationship, from: Endpoint<'_>, to: Endpoint<'_>) -> Result<()> {
    let rule = StandardRelation::Excludes;
    match (from, to) {
        (Endpoint::Period(a), Endpoint::Period(b)) => {
            if a.start <= b.end && b.start <= a.end {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!("periods '{}' and '{}' must not overlap", a.id, b.id),
                ));
            }
        }
        (Endpoint::Period(period), Endpoint::Event(event))
        | (Endpoint::Event(event), Endpoint::Period(period)) => {
            if period.start <= event.date && event.date <= period.end {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "event '{}' must not occur during period '{}'",
                        event.id, period.id
                    ),
                ));
            }
        }
        (Endpoint::Event(a), Endpoint::Event(b)) => {
            if a.date == b.date {
                return Err(violation(
                    rel,
                    rule,
                    from,
                    to,
                    format!(
                        "events '{}' and '{}' must not occur at the same time",
                        a.id, b.id
                    ),
                ));
            }
        }
    }
    Ok(())
}
