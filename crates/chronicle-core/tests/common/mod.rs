use chronicle_core_types::{
    Condition, DateExpr, Declaration, DeclarationKind, Program, SourcePos, Statement,
    StatementKind,
};

/// Build a declaration node at a throwaway position
#[allow(dead_code)]
pub fn decl(kind: DeclarationKind) -> Declaration {
    Declaration {
        pos: SourcePos::new(1, 1),
        kind,
    }
}

/// Build a statement node at a throwaway position
#[allow(dead_code)]
pub fn stmt(kind: StatementKind) -> Statement {
    Statement {
        pos: SourcePos::new(1, 1),
        kind,
    }
}

/// Event declaration with a bare-year date and default importance
#[allow(dead_code)]
pub fn event_decl(id: &str, year: i32) -> Declaration {
    decl(DeclarationKind::Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        date: DateExpr::year(year),
        importance: None,
    })
}

/// Period declaration spanning two bare years, default importance
#[allow(dead_code)]
pub fn period_decl(id: &str, start: i32, end: i32) -> Declaration {
    decl(DeclarationKind::Period {
        id: id.to_string(),
        title: format!("Period {}", id),
        start: DateExpr::year(start),
        end: DateExpr::year(end),
        importance: None,
    })
}

/// Relationship declaration with a raw relation type string
#[allow(dead_code)]
pub fn relationship_decl(id: &str, from: &str, to: &str, relation: &str) -> Declaration {
    decl(DeclarationKind::Relationship {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        relation: relation.to_string(),
    })
}

/// Timeline declaration over the given component ids
#[allow(dead_code)]
pub fn timeline_decl(id: &str, components: &[&str]) -> Declaration {
    decl(DeclarationKind::Timeline {
        id: id.to_string(),
        title: format!("Timeline {}", id),
        components: components.iter().map(|s| s.to_string()).collect(),
    })
}

/// Export statement
#[allow(dead_code)]
pub fn export_stmt(target: &str) -> Statement {
    stmt(StatementKind::Export {
        target: target.to_string(),
    })
}

/// For statement over `source`, binding `var`
#[allow(dead_code)]
pub fn for_stmt(var: &str, source: &str, body: Vec<Statement>) -> Statement {
    stmt(StatementKind::For {
        var: var.to_string(),
        source: source.to_string(),
        body,
    })
}

/// If statement with both branches
#[allow(dead_code)]
pub fn if_stmt(
    condition: Condition,
    then_block: Vec<Statement>,
    else_block: Vec<Statement>,
) -> Statement {
    stmt(StatementKind::If {
        condition,
        then_block,
        else_block,
    })
}

/// A program from parts
#[allow(dead_code)]
pub fn program(declarations: Vec<Declaration>, main: Vec<Statement>) -> Program {
    Program { declarations, main }
}
