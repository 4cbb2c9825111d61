//! Per-field compilation inputs and thread-through state.
//!
//! A [`FieldDescriptor`] is created fresh for every compiled field and
//! discarded once its fragment has been appended to the parent accumulator.
//! [`ThreadState`] is the only value that outlives a single call: it is
//! passed forward through a sequence of sibling compilations so later fields
//! can observe decisions made by earlier ones (the mutation-payload variable
//! swap).

use serde::{Deserialize, Serialize};

/// Declared cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// At most one value; the emitted comprehension is wrapped in `head(...)`
    Singular,
    /// A list of values; the bracketed comprehension is emitted unwrapped
    List,
}

impl Cardinality {
    pub fn is_list(&self) -> bool {
        matches!(self, Cardinality::List)
    }
}

/// Traversal direction of a node-relation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelDirection {
    /// Undirected pattern (no arrow on either side)
    #[default]
    None,
    /// Incoming edge: arrow on the left side of the pattern
    In,
    /// Outgoing edge: arrow on the right side of the pattern
    Out,
}

impl RelDirection {
    /// Parse a direction string case-insensitively (`in`/`IN`, `out`/`OUT`).
    /// Anything else is treated as undirected.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "in" => RelDirection::In,
            "out" => RelDirection::Out,
            _ => RelDirection::None,
        }
    }
}

/// Immutable per-field compilation input.
///
/// `query_params` and `skip_limit` arrive pre-rendered from the surrounding
/// driver (argument serialization and pagination are out of scope here);
/// `sub_selection` is the already-compiled projection body of the nested
/// entity, of which only index 0 is ever consumed at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub cardinality: Cardinality,
    /// Cypher variable bound to the entity currently being projected
    pub variable_name: String,
    /// Variable to bind for this field's target entity
    pub nested_variable: String,
    /// Relationship type to traverse, for fields on node types
    pub rel_type: Option<String>,
    pub rel_direction: RelDirection,
    /// Pre-rendered parameter/filter clause text (may be empty)
    pub query_params: String,
    /// Concrete type label when this field is selected under an inline
    /// fragment of an interface
    pub inline_fragment: Option<String>,
    /// Compiled projection body of the nested selection
    pub sub_selection: Vec<String>,
    /// Pre-rendered pagination clause text (may be empty)
    pub skip_limit: String,
    /// Separator appended when more sibling fields follow (may be empty)
    pub comma_if_tail: String,
}

impl FieldDescriptor {
    pub fn new(
        field_name: impl Into<String>,
        cardinality: Cardinality,
        variable_name: impl Into<String>,
        nested_variable: impl Into<String>,
    ) -> Self {
        FieldDescriptor {
            field_name: field_name.into(),
            cardinality,
            variable_name: variable_name.into(),
            nested_variable: nested_variable.into(),
            rel_type: None,
            rel_direction: RelDirection::None,
            query_params: String::new(),
            inline_fragment: None,
            sub_selection: Vec::new(),
            skip_limit: String::new(),
            comma_if_tail: String::new(),
        }
    }

    pub fn with_rel(mut self, rel_type: impl Into<String>, direction: RelDirection) -> Self {
        self.rel_type = Some(rel_type.into());
        self.rel_direction = direction;
        self
    }

    pub fn with_query_params(mut self, params: impl Into<String>) -> Self {
        self.query_params = params.into();
        self
    }

    pub fn with_inline_fragment(mut self, label: impl Into<String>) -> Self {
        self.inline_fragment = Some(label.into());
        self
    }

    pub fn with_sub_selection(mut self, body: impl Into<String>) -> Self {
        self.sub_selection = vec![body.into()];
        self
    }

    pub fn with_skip_limit(mut self, clause: impl Into<String>) -> Self {
        self.skip_limit = clause.into();
        self
    }

    pub fn with_comma_if_tail(mut self, separator: impl Into<String>) -> Self {
        self.comma_if_tail = separator.into();
        self
    }

    /// The nested projection body consumed by the rules (index 0 only).
    pub(crate) fn sub_selection(&self) -> &str {
        self.sub_selection.first().map(String::as_str).unwrap_or("")
    }
}

/// Pre-bound endpoint variables of a relationship-mutation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootVariableNames {
    pub from: String,
    pub to: String,
}

impl RootVariableNames {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RootVariableNames {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Thread-through state returned by every rule.
///
/// `root_variable_names` is propagated unchanged; `next_variable` is set only
/// by the mutation-payload rule and names the root variable the next sibling
/// endpoint field should bind as its `variable_name`. Siblings sharing this
/// state must be compiled sequentially, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadState {
    pub root_variable_names: Option<RootVariableNames>,
    pub next_variable: Option<String>,
}

impl ThreadState {
    /// State for compiling a relationship-mutation payload selection.
    pub fn for_mutation_payload(root: RootVariableNames) -> Self {
        ThreadState {
            root_variable_names: Some(root),
            next_variable: None,
        }
    }
}

/// Result of compiling one field: the augmented accumulator and the state to
/// thread into the next sibling compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub initial: String,
    pub tail: ThreadState,
}
