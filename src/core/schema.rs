use petgraph::Directed;
use petgraph::stable_graph::StableGraph;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::error::SchemaError;

/// Stroke colour of a one-to-one relationship
pub const EDGE_ONE_TO_ONE_COLOR: &str = "#1976d2";

/// Stroke colour of a one-to-many relationship
pub const EDGE_ONE_TO_MANY_COLOR: &str = "#d32f2f";

/// Stroke width shared by every relationship
pub const EDGE_STROKE_WIDTH: u8 = 2;

/// Side length of the closed arrow drawn at the end of a 1-N edge
pub const ARROW_MARKER_SIZE: u8 = 20;

/// Identifier of a table node, stable for the node's lifetime
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Graph node: one table of the diagram
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TableNode {
    pub id: NodeId,
    pub label: String,
    /// Display order; the first column is conventionally the identity column
    pub columns: Vec<Column>,
    /// Canvas position (x, y)
    pub position: (f64, f64),
}

impl TableNode {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            columns: Vec::new(),
            position: (0.0, 0.0),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// First column flagged as primary key
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.pk)
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_position(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn has_column_id(&self, column_id: &str) -> bool {
        self.column_position(column_id).is_some()
    }
}

/// Primitive column types offered by the attribute editor
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Varchar,
    Int,
    Bigint,
    Boolean,
    Date,
    Timestamp,
}

impl ColumnType {
    /// Every selectable type, in the order the editor lists them
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Varchar,
        ColumnType::Int,
        ColumnType::Bigint,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Varchar => "varchar",
            ColumnType::Int => "int",
            ColumnType::Bigint => "bigint",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| SchemaError::UnknownType(s.to_string()))
    }
}

/// Referential action applied to a foreign key
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CascadeRule {
    Cascade,
    Restrict,
}

impl CascadeRule {
    pub const ALL: [CascadeRule; 2] = [CascadeRule::Cascade, CascadeRule::Restrict];

    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeRule::Cascade => "CASCADE",
            CascadeRule::Restrict => "RESTRICT",
        }
    }
}

impl std::fmt::Display for CascadeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CascadeRule {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASCADE" => Ok(CascadeRule::Cascade),
            "RESTRICT" => Ok(CascadeRule::Restrict),
            _ => Err(SchemaError::UnknownCascadeRule(s.to_string())),
        }
    }
}

/// Table column
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Column {
    /// Unique within the owning table
    pub id: String,
    pub name: String,
    /// `None` only for a blank draft that has not been given a type yet
    pub data_type: Option<ColumnType>,
    pub pk: bool,
    pub fk: bool,
    pub unique: bool,
    pub on_update: Option<CascadeRule>,
    pub on_delete: Option<CascadeRule>,
    /// Relationship that synthesized this column, if it is a derived foreign key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type: Some(data_type),
            pk: false,
            fk: false,
            unique: false,
            on_update: None,
            on_delete: None,
            derived_from: None,
        }
    }

    /// Blank column used for the "new row" placeholder and the Add Attribute action
    pub fn draft() -> Self {
        Self {
            id: Self::fresh_id(),
            name: String::new(),
            data_type: None,
            pk: false,
            fk: false,
            unique: false,
            on_update: None,
            on_delete: None,
            derived_from: None,
        }
    }

    /// Identity column seeded into every new table
    pub fn identity(node: NodeId) -> Self {
        Self::new(format!("col-{}-id", node), "id", ColumnType::Bigint).primary_key()
    }

    pub fn fresh_id() -> String {
        format!("col-{}", Uuid::new_v4().simple())
    }

    pub fn primary_key(mut self) -> Self {
        self.pk = true;
        self
    }

    pub fn foreign_key(mut self, on_update: CascadeRule, on_delete: CascadeRule) -> Self {
        self.fk = true;
        self.on_update = Some(on_update);
        self.on_delete = Some(on_delete);
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// A column whose name is blank is a draft, not a stored attribute
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Relationship cardinality
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    #[serde(rename = "1-1")]
    OneToOne,
    #[serde(rename = "1-N")]
    OneToMany,
}

impl Cardinality {
    pub fn toggled(self) -> Self {
        match self {
            Cardinality::OneToOne => Cardinality::OneToMany,
            Cardinality::OneToMany => Cardinality::OneToOne,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1-1",
            Cardinality::OneToMany => "1-N",
        }
    }

    /// Visual attributes are derived from the cardinality, never stored
    pub fn style(&self) -> EdgeStyle {
        match self {
            Cardinality::OneToOne => EdgeStyle {
                stroke: EDGE_ONE_TO_ONE_COLOR,
                stroke_width: EDGE_STROKE_WIDTH,
                animated: false,
                marker_end: None,
            },
            Cardinality::OneToMany => EdgeStyle {
                stroke: EDGE_ONE_TO_MANY_COLOR,
                stroke_width: EDGE_STROKE_WIDTH,
                animated: true,
                marker_end: Some(ArrowMarker {
                    width: ARROW_MARKER_SIZE,
                    height: ARROW_MARKER_SIZE,
                    color: EDGE_ONE_TO_MANY_COLOR,
                }),
            },
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cardinality {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1-1" | "1:1" => Ok(Cardinality::OneToOne),
            "1-N" | "1:N" => Ok(Cardinality::OneToMany),
            _ => Err(SchemaError::UnknownCardinality(s.to_string())),
        }
    }
}

/// How the canvas draws an edge
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: u8,
    pub animated: bool,
    pub marker_end: Option<ArrowMarker>,
}

/// Closed arrow drawn at the target end of an edge
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct ArrowMarker {
    pub width: u8,
    pub height: u8,
    pub color: &'static str,
}

/// Graph edge: directed reference from `source` to `target`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub cardinality: Cardinality,
    /// Creation order among the diagram's relationships
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Relationship {
    pub fn new(source: NodeId, target: NodeId, sequence: u64) -> Self {
        Self {
            id: format!("e{}-{}-{}", source, target, sequence),
            source,
            target,
            cardinality: Cardinality::default(),
            sequence,
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(mut self, source: Option<String>, target: Option<String>) -> Self {
        self.source_handle = source;
        self.target_handle = target;
        self
    }

    pub fn style(&self) -> EdgeStyle {
        self.cardinality.style()
    }
}

/// Graph type: nodes are tables, edges are relationships
pub type SchemaGraph = StableGraph<TableNode, Relationship, Directed>;

/// Name a derived foreign-key column gets on the target table
pub fn derived_column_name(source_label: &str, pk_name: &str) -> String {
    format!("{}_{}", source_label, pk_name)
}
