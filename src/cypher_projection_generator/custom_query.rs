//! Custom Cypher field rule.
//!
//! A field may override its resolution with a user-supplied Cypher fragment
//! carrying its own MATCH and terminal RETURN clauses. The enclosing compiled
//! query already establishes the binding context, so the fragment is spliced
//! into a list comprehension with its MATCH keyword and RETURN clause
//! stripped, projecting the identifier the fragment returned:
//!
//! ```text
//! similar: head([ (this)--(:Genre)--(o:Movie) | o {.title}])
//! ```
//!
//! The fragment references the current entity through the `{this}`
//! placeholder, which is substituted after clause stripping.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::{head_close, head_open};
use super::errors::ProjectionError;
use super::field::{CompiledField, FieldDescriptor, ThreadState};

lazy_static! {
    /// Identifier bound by the fragment's terminal RETURN clause.
    static ref RETURN_VARIABLE: Regex =
        Regex::new(r"(?i)\bRETURN\s+([A-Za-z_][A-Za-z0-9_]*)\s*$").unwrap();
    /// Leading MATCH keyword; the pattern itself is kept as the
    /// comprehension's pattern.
    static ref LEADING_MATCH: Regex = Regex::new(r"(?i)^\s*MATCH\s+").unwrap();
    /// Any RETURN keyword, used to locate the terminal clause for stripping.
    static ref RETURN_KEYWORD: Regex = Regex::new(r"(?i)\bRETURN\b").unwrap();
}

/// Extract the identifier bound by the fragment's terminal RETURN clause.
pub(crate) fn return_variable(
    custom_cypher: &str,
    field_name: &str,
) -> Result<String, ProjectionError> {
    RETURN_VARIABLE
        .captures(custom_cypher)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ProjectionError::MissingReturnVariable {
            field_name: field_name.to_string(),
        })
}

/// Drop the leading MATCH keyword, keeping its pattern.
pub(crate) fn strip_match_clause(custom_cypher: &str) -> String {
    LEADING_MATCH.replace(custom_cypher, "").into_owned()
}

/// Drop everything from the last RETURN keyword onward; the enclosing
/// comprehension supplies its own projection.
pub(crate) fn strip_return_clause(custom_cypher: &str) -> String {
    match RETURN_KEYWORD.find_iter(custom_cypher).last() {
        Some(m) => custom_cypher[..m.start()].trim_end().to_string(),
        None => custom_cypher.to_string(),
    }
}

/// Compile a field backed by a custom Cypher fragment.
///
/// The variable substituted for `{this}` is suffixed `_relation` when the
/// container type is a relationship, avoiding a collision with the node
/// entity variable of the same logical name.
pub(crate) fn custom_query_field(
    initial: &str,
    field: &FieldDescriptor,
    custom_cypher: &str,
    container_is_relationship: bool,
    state: ThreadState,
) -> Result<CompiledField, ProjectionError> {
    let variable_name = if container_is_relationship {
        format!("{}_relation", field.variable_name)
    } else {
        field.variable_name.clone()
    };

    let ret_val = return_variable(custom_cypher, &field.field_name)?;
    let fragment = strip_return_clause(&strip_match_clause(custom_cypher));
    let fragment = fragment.trim().replace("{this}", &variable_name);

    let initial = format!(
        "{}{}: {}[ {} | {} {{{}}}]{}{} {}",
        initial,
        field.field_name,
        head_open(field.cardinality),
        fragment,
        ret_val,
        field.sub_selection(),
        head_close(field.cardinality),
        field.skip_limit,
        field.comma_if_tail,
    );
    Ok(CompiledField {
        initial,
        tail: state,
    })
}
