use std::time::Instant;

use tracing::debug;

use chronicle_core_types::{
    Condition, Declaration, DeclarationKind, Importance, Program, PropertyName, Statement,
    StatementKind,
};

use crate::env::Environment;
use crate::errors::{ChronicleError, Diagnostic, Result};
use crate::export::{self, ExportLog, ExportRecord};
use crate::model::{
    validate_title, Entity, EntityKind, Event, HistoricalDate, Period, RelationKind, Relationship,
    StandardRelation, Timeline,
};
use crate::render::{NullRenderer, Renderer};
use crate::rules;
use crate::{log_op_end, log_op_start};

use super::expr::{compare_values, eval_expr, Value};

/// Policy for diagnostics raised by top-level main-block statements
///
/// Declarations always accumulate: one failing declaration never blocks its
/// siblings. Inside a single statement, execution is always fail-fast. What
/// is configurable is whether a failed top-level statement aborts the
/// statements after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop main-block execution at the first failed statement
    #[default]
    FailFast,
    /// Record the diagnostic and continue with the next statement
    Continue,
}

/// The result of one complete program run
///
/// `diagnostics` holds every recorded error in order; none are dropped.
/// `exports` is the ordered export list, populated up to the point of
/// failure when the run did not complete.
#[derive(Debug)]
pub struct RunOutcome {
    pub exports: Vec<ExportRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The program evaluator
///
/// Owns the environment and export list for exactly one run: [`run`]
/// consumes the evaluator, so state can never leak between programs.
/// Evaluation is synchronous and single-threaded throughout.
///
/// [`run`]: Evaluator::run
pub struct Evaluator<R: Renderer = NullRenderer> {
    env: Environment,
    exports: ExportLog,
    diagnostics: Vec<Diagnostic>,
    mode: ErrorMode,
    renderer: R,
}

impl Evaluator<NullRenderer> {
    /// Evaluator with the default fail-fast mode and no image backend
    pub fn new() -> Self {
        Self::with_mode(ErrorMode::default())
    }

    pub fn with_mode(mode: ErrorMode) -> Self {
        Self::with_renderer(NullRenderer, mode)
    }
}

impl Default for Evaluator<NullRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> Evaluator<R> {
    pub fn with_renderer(renderer: R, mode: ErrorMode) -> Self {
        Self {
            env: Environment::new(),
            exports: ExportLog::new(),
            diagnostics: Vec::new(),
            mode,
            renderer,
        }
    }

    /// Run a complete program: declarations first, then the main block
    ///
    /// Each failing declaration is recorded and abandoned without blocking
    /// its siblings. Main-block statements run in order under the
    /// configured [`ErrorMode`]. Consumes the evaluator; every run starts
    /// from a fresh one.
    pub fn run(mut self, program: &Program) -> RunOutcome {
        let start = Instant::now();
        log_op_start!(
            "run_program",
            decl_count = program.declarations.len(),
            stmt_count = program.main.len()
        );

        for decl in &program.declarations {
            if let Err(err) = self.exec_declaration(decl) {
                debug!(
                    entity_id = decl.kind.id(),
                    err_code = err.code(),
                    "declaration abandoned"
                );
                self.diagnostics.push(Diagnostic::new(err, Some(decl.pos)));
            }
        }

        for stmt in &program.main {
            if let Err(err) = self.exec_statement(stmt) {
                self.diagnostics.push(Diagnostic::new(err, Some(stmt.pos)));
                if self.mode == ErrorMode::FailFast {
                    break;
                }
            }
        }

        log_op_end!(
            "run_program",
            duration_ms = start.elapsed().as_millis() as u64,
            export_count = self.exports.len(),
            diag_count = self.diagnostics.len()
        );

        RunOutcome {
            exports: self.exports.into_records(),
            diagnostics: self.diagnostics,
        }
    }

    fn exec_declaration(&mut self, decl: &Declaration) -> Result<()> {
        match &decl.kind {
            DeclarationKind::Event {
                id,
                title,
                date,
                importance,
            } => {
                let importance = parse_importance(id, importance.as_deref())?;
                let date = HistoricalDate::from_expr(date)?;
                let event = Event::new(id.clone(), title.clone(), date, importance)?;
                self.env.declare(Entity::Event(event))
            }
            DeclarationKind::Period {
                id,
                title,
                start,
                end,
                importance,
            } => {
                let importance = parse_importance(id, importance.as_deref())?;
                let start = HistoricalDate::from_expr(start)?;
                let end = HistoricalDate::from_expr(end)?;
                let period = Period::new(id.clone(), title.clone(), start, end, importance)?;
                self.env.declare(Entity::Period(period))
            }
            DeclarationKind::Relationship {
                id,
                from,
                to,
                relation,
            } => {
                let from_kind = self.dated_endpoint_kind(id, from)?;
                self.dated_endpoint_kind(id, to)?;
                let rel =
                    Relationship::new(id.clone(), from.clone(), from_kind, to.clone(), relation)?;
                self.env.declare(Entity::Relationship(rel))
            }
            DeclarationKind::Timeline {
                id,
                title,
                components,
            } => {
                let timeline = Timeline::new(id.clone(), title.clone(), components.clone())?;
                rules::finalize_timeline(&self.env, &timeline)?;
                self.env.declare(Entity::Timeline(timeline))
            }
        }
    }

    /// Resolve a relationship endpoint to its kind; only dated entities
    /// qualify
    fn dated_endpoint_kind(&self, rel_id: &str, endpoint: &str) -> Result<EntityKind> {
        match self.env.get(endpoint) {
            Some(Entity::Event(_)) => Ok(EntityKind::Event),
            Some(Entity::Period(_)) => Ok(EntityKind::Period),
            Some(_) | None => Err(ChronicleError::UnknownIdentifier {
                id: endpoint.to_string(),
                context: format!(
                    "endpoint of relationship '{}' (must be an event or period)",
                    rel_id
                ),
            }),
        }
    }

    fn exec_statement(&mut self, stmt: &Statement) -> Result<()> {
        match &stmt.kind {
            StatementKind::Export { target } => self.exec_export(target),

            StatementKind::If {
                condition,
                then_block,
                else_block,
            } => {
                let branch = if self.eval_condition(condition)? {
                    then_block
                } else {
                    else_block
                };
                for inner in branch {
                    self.exec_statement(inner)?;
                }
                Ok(())
            }

            StatementKind::For { var, source, body } => self.exec_for(var, source, body),

            StatementKind::Modify {
                target,
                assignments,
            } => self.exec_modify(target, assignments),
        }
    }

    fn exec_export(&mut self, target: &str) -> Result<()> {
        let entity =
            self.env
                .resolve(target)
                .ok_or_else(|| ChronicleError::UnknownIdentifier {
                    id: target.to_string(),
                    context: "export target".to_string(),
                })?;
        let kind = entity.kind();
        let canonical = entity.id().to_string();

        if self.exports.already_exported(kind, &canonical) {
            debug!(entity_id = %canonical, "already exported, skipping");
            return Ok(());
        }

        // Relationships have no title of their own; the relation label
        // stands in for export descriptors.
        let title = match entity {
            Entity::Relationship(rel) => rel.kind.label().to_string(),
            other => other.title().unwrap_or_default().to_string(),
        };
        let payload = export::entity_payload(entity, &self.env);
        let image = match entity {
            Entity::Timeline(timeline) => Some(
                self.renderer
                    .render_timeline(timeline, &self.env)
                    .map_err(|message| ChronicleError::RenderFailed {
                        timeline_id: timeline.id.clone(),
                        message,
                    })?,
            ),
            _ => None,
        };

        let display_id = self.exports.append(kind, &canonical, title, payload, image);
        debug!(entity_id = %canonical, display_id = %display_id, kind = %kind, "exported");
        Ok(())
    }

    fn exec_for(&mut self, var: &str, source: &str, body: &[Statement]) -> Result<()> {
        let ids: Vec<String> = match self.env.resolve(source) {
            Some(Entity::Timeline(timeline)) => timeline.component_ids.clone(),
            Some(Entity::Event(event)) => vec![event.id.clone()],
            Some(Entity::Period(period)) => vec![period.id.clone()],
            Some(Entity::Relationship(_)) | None => {
                return Err(ChronicleError::UnknownIdentifier {
                    id: source.to_string(),
                    context: "loop source (must be a timeline, event, or period)".to_string(),
                });
            }
        };

        // The scope frame must be popped even when the body fails, so the
        // loop variable never outlives the loop.
        self.env.push_scope();
        let mut result = Ok(());
        'iteration: for id in &ids {
            self.env.bind(var, id);
            for inner in body {
                if let Err(err) = self.exec_statement(inner) {
                    result = Err(err);
                    break 'iteration;
                }
            }
        }
        self.env.pop_scope();
        result
    }

    fn exec_modify(
        &mut self,
        target: &str,
        assignments: &[chronicle_core_types::PropertyAssignment],
    ) -> Result<()> {
        let id = self
            .env
            .resolve_id(target)
            .ok_or_else(|| ChronicleError::UnknownIdentifier {
                id: target.to_string(),
                context: "modify target".to_string(),
            })?
            .to_string();

        // Assignments apply in order; a later value expression sees the
        // effect of earlier assignments.
        for assignment in assignments {
            let value = eval_expr(&self.env, &assignment.value)?;
            let entity = self
                .env
                .get_mut(&id)
                .ok_or_else(|| ChronicleError::UnknownIdentifier {
                    id: id.clone(),
                    context: "modify target".to_string(),
                })?;
            apply_assignment(entity, assignment.property, value)?;
        }

        // Re-validation happens after all assignments; on failure the
        // mutation stays applied (no rollback).
        self.revalidate(&id)
    }

    /// Re-check entity-local invariants after a modify statement
    fn revalidate(&self, id: &str) -> Result<()> {
        match self.env.get(id) {
            Some(Entity::Event(event)) => validate_title(&event.id, &event.title),
            Some(Entity::Period(period)) => {
                validate_title(&period.id, &period.title)?;
                period.validate_dates()
            }
            Some(Entity::Timeline(timeline)) => validate_title(&timeline.id, &timeline.title),
            Some(Entity::Relationship(rel)) => {
                for endpoint in [&rel.from_id, &rel.to_id] {
                    if self.env.get(endpoint).is_none() {
                        return Err(ChronicleError::UnknownIdentifier {
                            id: endpoint.clone(),
                            context: format!("endpoint of relationship '{}'", rel.id),
                        });
                    }
                }
                if rel.kind == RelationKind::Standard(StandardRelation::Includes)
                    && self
                        .env
                        .get(&rel.from_id)
                        .and_then(Entity::as_period)
                        .is_none()
                {
                    return Err(ChronicleError::IncludesRequiresPeriod {
                        relationship_id: rel.id.clone(),
                        from_id: rel.from_id.clone(),
                    });
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn eval_condition(&self, condition: &Condition) -> Result<bool> {
        match condition {
            Condition::Compare { left, op, right } => {
                let left = eval_expr(&self.env, left)?;
                let right = eval_expr(&self.env, right)?;
                compare_values(&left, *op, &right)
            }
            Condition::Exists(name) => Ok(self.env.resolve(name).is_some()),
            Condition::Bool(value) => Ok(*value),
        }
    }
}

fn parse_importance(id: &str, raw: Option<&str>) -> Result<Importance> {
    match raw {
        None => Ok(Importance::default()),
        Some(text) => text
            .parse()
            .map_err(|_| ChronicleError::InvalidImportance {
                id: id.to_string(),
                value: text.to_string(),
            }),
    }
}

/// Apply one property assignment, per the closed dispatch table
///
/// `id` is readable everywhere but never assignable. Date-valued
/// properties accept a date or a bare integer read as a year. Inapplicable
/// property/kind pairings are runtime diagnostics; applicable pairings
/// with the wrong value class are type diagnostics.
fn apply_assignment(entity: &mut Entity, property: PropertyName, value: Value) -> Result<()> {
    let id = entity.id().to_string();
    let kind = entity.kind();

    if property == PropertyName::Id {
        return Err(ChronicleError::InvalidAssignment {
            id,
            property: property.as_str().to_string(),
            expected: "nothing (id is immutable)".to_string(),
            got: value.type_name().to_string(),
        });
    }

    let mismatch = |expected: &str, got: &Value| ChronicleError::InvalidAssignment {
        id: id.clone(),
        property: property.as_str().to_string(),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    };

    match (&mut *entity, property) {
        (Entity::Event(event), PropertyName::Title) => match value {
            Value::Str(s) => {
                event.title = s;
                Ok(())
            }
            other => Err(mismatch("string", &other)),
        },
        (Entity::Event(event), PropertyName::Importance) => match value {
            Value::Importance(tier) => {
                event.importance = tier;
                Ok(())
            }
            other => Err(mismatch("importance tier", &other)),
        },
        (Entity::Event(event), PropertyName::Date) => match as_date(&value) {
            Some(date) => {
                event.date = date;
                Ok(())
            }
            None => Err(mismatch("date", &value)),
        },

        (Entity::Period(period), PropertyName::Title) => match value {
            Value::Str(s) => {
                period.title = s;
                Ok(())
            }
            other => Err(mismatch("string", &other)),
        },
        (Entity::Period(period), PropertyName::Importance) => match value {
            Value::Importance(tier) => {
                period.importance = tier;
                Ok(())
            }
            other => Err(mismatch("importance tier", &other)),
        },
        (Entity::Period(period), PropertyName::Start) => match as_date(&value) {
            Some(date) => {
                period.start = date;
                Ok(())
            }
            None => Err(mismatch("date", &value)),
        },
        (Entity::Period(period), PropertyName::End) => match as_date(&value) {
            Some(date) => {
                period.end = date;
                Ok(())
            }
            None => Err(mismatch("date", &value)),
        },

        (Entity::Relationship(rel), PropertyName::Relation) => match value {
            Value::Str(s) => {
                rel.kind = RelationKind::parse(&s);
                Ok(())
            }
            other => Err(mismatch("string", &other)),
        },

        (Entity::Timeline(timeline), PropertyName::Title) => match value {
            Value::Str(s) => {
                timeline.title = s;
                Ok(())
            }
            other => Err(mismatch("string", &other)),
        },

        _ => Err(ChronicleError::UnknownProperty {
            kind,
            id,
            property: property.as_str().to_string(),
        }),
    }
}

fn as_date(value: &Value) -> Option<HistoricalDate> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Int(year) => i32::try_from(*year).ok().map(HistoricalDate::from_year),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core_types::{CompareOp, DateExpr, Expr, SourcePos};

    fn decl(kind: DeclarationKind) -> Declaration {
        Declaration {
            pos: SourcePos::new(1, 1),
            kind,
        }
    }

    fn event_decl(id: &str, year: i32) -> Declaration {
        decl(DeclarationKind::Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            date: DateExpr::year(year),
            importance: None,
        })
    }

    #[test]
    fn test_default_importance_is_medium() {
        assert_eq!(parse_importance("e1", None).unwrap(), Importance::Medium);
        assert_eq!(
            parse_importance("e1", Some("high")).unwrap(),
            Importance::High
        );
        assert!(matches!(
            parse_importance("e1", Some("URGENT")),
            Err(ChronicleError::InvalidImportance { .. })
        ));
    }

    #[test]
    fn test_failing_declaration_does_not_block_siblings() {
        let program = Program {
            declarations: vec![
                decl(DeclarationKind::Event {
                    id: "bad".to_string(),
                    title: "   ".to_string(),
                    date: DateExpr::year(100),
                    importance: None,
                }),
                event_decl("good", 200),
            ],
            main: vec![Statement {
                pos: SourcePos::new(3, 1),
                kind: StatementKind::Export {
                    target: "good".to_string(),
                },
            }],
        };

        let outcome = Evaluator::new().run(&program);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.exports.len(), 1);
        assert_eq!(outcome.exports[0].display_id, "good");
    }

    #[test]
    fn test_bare_identifier_condition_checks_existence() {
        let program = Program {
            declarations: vec![event_decl("e1", 100)],
            main: vec![Statement {
                pos: SourcePos::new(2, 1),
                kind: StatementKind::If {
                    condition: Condition::Exists("e1".to_string()),
                    then_block: vec![Statement {
                        pos: SourcePos::new(3, 1),
                        kind: StatementKind::Export {
                            target: "e1".to_string(),
                        },
                    }],
                    else_block: vec![],
                },
            }],
        };

        let outcome = Evaluator::new().run(&program);
        assert!(outcome.is_success());
        assert_eq!(outcome.exports.len(), 1);
    }

    #[test]
    fn test_comparison_condition_selects_else_branch() {
        let program = Program {
            declarations: vec![event_decl("e1", 100), event_decl("e2", 200)],
            main: vec![Statement {
                pos: SourcePos::new(3, 1),
                kind: StatementKind::If {
                    condition: Condition::Compare {
                        left: Expr::Property {
                            object: "e1".to_string(),
                            property: PropertyName::Date,
                        },
                        op: CompareOp::Gt,
                        right: Expr::Property {
                            object: "e2".to_string(),
                            property: PropertyName::Date,
                        },
                    },
                    then_block: vec![Statement {
                        pos: SourcePos::new(4, 1),
                        kind: StatementKind::Export {
                            target: "e1".to_string(),
                        },
                    }],
                    else_block: vec![Statement {
                        pos: SourcePos::new(5, 1),
                        kind: StatementKind::Export {
                            target: "e2".to_string(),
                        },
                    }],
                },
            }],
        };

        let outcome = Evaluator::new().run(&program);
        assert!(outcome.is_success());
        assert_eq!(outcome.exports.len(), 1);
        assert_eq!(outcome.exports[0].display_id, "e2");
    }

    #[test]
    fn test_modify_applies_assignments_in_order() {
        let mut env = Environment::new();
        env.declare(Entity::Event(
            Event::new(
                "e1".to_string(),
                "Old title".to_string(),
                HistoricalDate::from_year(100),
                Importance::Low,
            )
            .unwrap(),
        ))
        .unwrap();

        let entity = env.get_mut("e1").unwrap();
        apply_assignment(
            entity,
            PropertyName::Title,
            Value::Str("New title".to_string()),
        )
        .unwrap();
        apply_assignment(entity, PropertyName::Date, Value::Int(500)).unwrap();

        let event = env.get("e1").unwrap().as_event().unwrap();
        assert_eq!(event.title, "New title");
        assert_eq!(event.date.year(), 500);
    }

    #[test]
    fn test_assigning_id_is_rejected() {
        let mut entity = Entity::Event(
            Event::new(
                "e1".to_string(),
                "Event".to_string(),
                HistoricalDate::from_year(100),
                Importance::Medium,
            )
            .unwrap(),
        );
        let result = apply_assignment(
            &mut entity,
            PropertyName::Id,
            Value::Str("e2".to_string()),
        );
        assert!(matches!(
            result,
            Err(ChronicleError::InvalidAssignment { .. })
        ));
        assert_eq!(entity.id(), "e1");
    }

    #[test]
    fn test_wrong_value_class_is_type_diagnostic() {
        let mut entity = Entity::Event(
            Event::new(
                "e1".to_string(),
                "Event".to_string(),
                HistoricalDate::from_year(100),
                Importance::Medium,
            )
            .unwrap(),
        );
        let result = apply_assignment(
            &mut entity,
            PropertyName::Title,
            Value::Int(7),
        );
        assert!(matches!(
            result,
            Err(ChronicleError::InvalidAssignment { expected, got, .. })
                if expected == "string" && got == "integer"
        ));
    }

    #[test]
    fn test_inapplicable_property_is_runtime_diagnostic() {
        let mut entity = Entity::Event(
            Event::new(
                "e1".to_string(),
                "Event".to_string(),
                HistoricalDate::from_year(100),
                Importance::Medium,
            )
            .unwrap(),
        );
        let result = apply_assignment(
            &mut entity,
            PropertyName::Start,
            Value::Date(HistoricalDate::from_year(50)),
        );
        assert!(matches!(
            result,
            Err(ChronicleError::UnknownProperty { .. })
        ));
    }
}
