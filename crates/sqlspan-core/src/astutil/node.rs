//! The owned node sum used by the rewriter.

use crate::ast::{
    Assignment, ColumnConstraint, ColumnDef, Cte, Expr, File, Ident, JoinClause, LimitExpr,
    NodeRef, ObjectName, OrderByExpr, Query, SelectItem, SqlSelect, Stmt, TableConstraint,
    TableElement, TableFactor, VirtualTableArg,
};

/// An owned AST node of any kind, as moved through [`super::Cursor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(File),
    Stmt(Stmt),
    Query(Query),
    Cte(Cte),
    Select(SqlSelect),
    SelectItem(SelectItem),
    TableFactor(TableFactor),
    JoinClause(JoinClause),
    OrderByExpr(OrderByExpr),
    LimitExpr(LimitExpr),
    Expr(Expr),
    Ident(Ident),
    ObjectName(ObjectName),
    ColumnDef(ColumnDef),
    ColumnConstraint(ColumnConstraint),
    TableConstraint(TableConstraint),
    VirtualTableArg(VirtualTableArg),
    Assignment(Assignment),
}

impl Node {
    /// Returns a borrowed view of the node.
    #[must_use]
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Self::File(n) => NodeRef::File(n),
            Self::Stmt(n) => NodeRef::Stmt(n),
            Self::Query(n) => NodeRef::Query(n),
            Self::Cte(n) => NodeRef::Cte(n),
            Self::Select(n) => NodeRef::Select(n),
            Self::SelectItem(n) => NodeRef::SelectItem(n),
            Self::TableFactor(n) => NodeRef::TableFactor(n),
            Self::JoinClause(n) => NodeRef::JoinClause(n),
            Self::OrderByExpr(n) => NodeRef::OrderByExpr(n),
            Self::LimitExpr(n) => NodeRef::LimitExpr(n),
            Self::Expr(n) => NodeRef::Expr(n),
            Self::Ident(n) => NodeRef::Ident(n),
            Self::ObjectName(n) => NodeRef::ObjectName(n),
            Self::ColumnDef(n) => NodeRef::ColumnDef(n),
            Self::ColumnConstraint(n) => NodeRef::ColumnConstraint(n),
            Self::TableConstraint(n) => NodeRef::TableConstraint(n),
            Self::VirtualTableArg(n) => NodeRef::VirtualTableArg(n),
            Self::Assignment(n) => NodeRef::Assignment(n),
        }
    }

    /// Returns the concrete kind name, as in [`NodeRef::kind_name`].
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.as_node_ref().kind_name()
    }
}

/// Types that occupy a child slot and can round-trip through [`Node`].
/// Placing a node of the wrong kind back into a slot panics, mirroring
/// a failed type assertion in a reflective rewriter.
pub(crate) trait NodeValue: Into<Node> {
    fn from_node(node: Node, slot: &'static str) -> Self;
}

macro_rules! node_value {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Node {
            fn from(value: $ty) -> Self {
                Node::$variant(value)
            }
        }

        impl NodeValue for $ty {
            fn from_node(node: Node, slot: &'static str) -> Self {
                match node {
                    Node::$variant(value) => value,
                    other => panic!(
                        "cannot place a {} into the {} slot (expected {})",
                        other.kind_name(),
                        slot,
                        stringify!($variant)
                    ),
                }
            }
        }
    };
}

node_value!(File, File);
node_value!(Stmt, Stmt);
node_value!(Query, Query);
node_value!(Cte, Cte);
node_value!(Select, SqlSelect);
node_value!(SelectItem, SelectItem);
node_value!(TableFactor, TableFactor);
node_value!(JoinClause, JoinClause);
node_value!(OrderByExpr, OrderByExpr);
node_value!(LimitExpr, LimitExpr);
node_value!(Expr, Expr);
node_value!(Ident, Ident);
node_value!(ObjectName, ObjectName);
node_value!(ColumnDef, ColumnDef);
node_value!(ColumnConstraint, ColumnConstraint);
node_value!(TableConstraint, TableConstraint);
node_value!(VirtualTableArg, VirtualTableArg);
node_value!(Assignment, Assignment);

// Table elements surface as their underlying column or constraint, so
// a cursor sees the same node kinds the walker exposes.
impl From<TableElement> for Node {
    fn from(value: TableElement) -> Self {
        match value {
            TableElement::Column(column) => Node::ColumnDef(column),
            TableElement::Constraint(constraint) => Node::TableConstraint(constraint),
        }
    }
}

impl NodeValue for TableElement {
    fn from_node(node: Node, slot: &'static str) -> Self {
        match node {
            Node::ColumnDef(column) => TableElement::Column(column),
            Node::TableConstraint(constraint) => TableElement::Constraint(constraint),
            other => panic!(
                "cannot place a {} into the {} slot (expected ColumnDef or TableConstraint)",
                other.kind_name(),
                slot
            ),
        }
    }
}
