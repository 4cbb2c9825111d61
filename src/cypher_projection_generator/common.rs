//! Shared fragment-rendering helpers.
//!
//! The concrete Cypher syntax (bracket comprehensions, `head(...)`, arrow
//! placement) is a fixed wire format; these helpers are the only place that
//! spells it out.

use super::field::Cardinality;

/// Opening wrapper for the field's comprehension: singular fields coerce the
/// list to its first element.
pub(crate) fn head_open(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::List => "",
        Cardinality::Singular => "head(",
    }
}

/// Closing counterpart of [`head_open`].
pub(crate) fn head_close(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::List => "",
        Cardinality::Singular => ")",
    }
}

/// Left-hand arrow of an edge pattern: `<` when the edge points into the
/// current entity.
pub(crate) fn left_arrow(inbound: bool) -> &'static str {
    if inbound {
        "<"
    } else {
        ""
    }
}

/// Right-hand arrow of an edge pattern: `>` when the edge points away from
/// the current entity.
pub(crate) fn right_arrow(outbound: bool) -> &'static str {
    if outbound {
        ">"
    } else {
        ""
    }
}

/// Projection body for the nested entity. Under an inline fragment the
/// synthetic `FRAGMENT_TYPE` discriminator comes first so callers can later
/// recover the concrete runtime type of a polymorphic result.
pub(crate) fn projection_body(inline_fragment: Option<&str>, sub_selection: &str) -> String {
    match inline_fragment {
        Some(label) => format!("FRAGMENT_TYPE: \"{}\",{}", label, sub_selection),
        None => sub_selection.to_string(),
    }
}

/// Label to bind the traversal target to: the inline-fragment label wins
/// over the schema type name.
pub(crate) fn target_label<'a>(inline_fragment: Option<&'a str>, type_name: &'a str) -> &'a str {
    inline_fragment.unwrap_or(type_name)
}
