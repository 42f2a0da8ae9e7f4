//! Cursor-based tree rewriting.

use crate::ast::{
    AlterColumnAction, AlterTableAction, ColumnConstraintKind, Expr, InsertSource, JoinConstraint,
    SelectItem, Stmt, TableConstraintKind, TableFactor, VirtualTableArg,
};

use super::node::{Node, NodeValue};

/// The rewriter's view of one child slot. Exposes where the node sits
/// (parent kind, field name, list index) and mutation operations.
pub struct Cursor {
    parent: &'static str,
    name: &'static str,
    index: Option<usize>,
    node: Option<Node>,
    inserted_before: Vec<Node>,
    inserted_after: Vec<Node>,
}

impl Cursor {
    fn new(parent: &'static str, name: &'static str, index: Option<usize>, node: Node) -> Self {
        Self {
            parent,
            name,
            index,
            node: Some(node),
            inserted_before: Vec::new(),
            inserted_after: Vec::new(),
        }
    }

    /// The kind name of the parent node (empty for the root).
    #[must_use]
    pub fn parent(&self) -> &'static str {
        self.parent
    }

    /// The field name of the slot in the parent.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The index within a list slot, or `None` for single slots.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The node currently in the slot. Panics after [`Cursor::delete`].
    #[must_use]
    pub fn node(&self) -> &Node {
        self.node.as_ref().expect("node was deleted")
    }

    /// Replaces the current node.
    pub fn replace(&mut self, node: Node) {
        assert!(self.node.is_some(), "cannot replace a deleted node");
        self.node = Some(node);
    }

    /// Deletes the current node. Panics for non-list slots.
    pub fn delete(&mut self) {
        assert!(
            self.index.is_some(),
            "cannot delete from the non-list slot {}.{}",
            self.parent,
            self.name
        );
        self.node = None;
    }

    /// Inserts a sibling before the current node. Panics for non-list
    /// slots.
    pub fn insert_before(&mut self, node: Node) {
        assert!(
            self.index.is_some(),
            "cannot insert into the non-list slot {}.{}",
            self.parent,
            self.name
        );
        self.inserted_before.push(node);
    }

    /// Inserts a sibling after the current node. Panics for non-list
    /// slots.
    pub fn insert_after(&mut self, node: Node) {
        assert!(
            self.index.is_some(),
            "cannot insert into the non-list slot {}.{}",
            self.parent,
            self.name
        );
        self.inserted_after.push(node);
    }
}

/// Rewrites `root` and returns the (possibly replaced) result.
///
/// `pre` runs before a node's children are walked; returning `false`
/// skips the subtree. `post` runs after; returning `false` aborts the
/// remaining traversal. Identity callbacks yield a tree structurally
/// equal to the input.
pub fn apply<Pre, Post>(root: Node, mut pre: Pre, mut post: Post) -> Node
where
    Pre: FnMut(&mut Cursor) -> bool,
    Post: FnMut(&mut Cursor) -> bool,
{
    let mut rewriter = Rewriter {
        pre: &mut pre,
        post: &mut post,
        aborted: false,
    };
    let (_, node, _) = rewriter.rewrite("", "root", None, root);
    node.expect("the root slot cannot be deleted")
}

struct Rewriter<'f> {
    pre: &'f mut dyn FnMut(&mut Cursor) -> bool,
    post: &'f mut dyn FnMut(&mut Cursor) -> bool,
    aborted: bool,
}

/// What came out of one slot: insertions before, the surviving node (if
/// not deleted) and insertions after.
type SlotResult = (Vec<Node>, Option<Node>, Vec<Node>);

impl Rewriter<'_> {
    fn rewrite(
        &mut self,
        parent: &'static str,
        name: &'static str,
        index: Option<usize>,
        node: Node,
    ) -> SlotResult {
        if self.aborted {
            return (Vec::new(), Some(node), Vec::new());
        }

        let mut cursor = Cursor::new(parent, name, index, node);
        let descend = (self.pre)(&mut cursor);
        let mut before = cursor.inserted_before;
        let mut after = cursor.inserted_after;
        let Some(mut node) = cursor.node else {
            return (before, None, after);
        };

        if descend && !self.aborted {
            node = self.rewrite_children(node);
        }

        if self.aborted {
            return (before, Some(node), after);
        }

        let mut cursor = Cursor::new(parent, name, index, node);
        if !(self.post)(&mut cursor) {
            self.aborted = true;
        }
        before.extend(cursor.inserted_before);
        after.extend(cursor.inserted_after);
        (before, cursor.node, after)
    }

    /// Rewrites a single (non-list) slot. Deletion is rejected by the
    /// cursor, so the slot always survives.
    fn slot<T: NodeValue>(&mut self, parent: &'static str, name: &'static str, value: T) -> T {
        let (_, node, _) = self.rewrite(parent, name, None, value.into());
        T::from_node(node.expect("non-list slot survived"), name)
    }

    fn slot_box<T: NodeValue>(
        &mut self,
        parent: &'static str,
        name: &'static str,
        value: Box<T>,
    ) -> Box<T> {
        Box::new(self.slot(parent, name, *value))
    }

    fn slot_opt<T: NodeValue>(
        &mut self,
        parent: &'static str,
        name: &'static str,
        value: Option<T>,
    ) -> Option<T> {
        value.map(|v| self.slot(parent, name, v))
    }

    /// Rewrites a list slot, splicing insertions and dropping deleted
    /// items while keeping the walk order stable.
    fn list<T: NodeValue>(
        &mut self,
        parent: &'static str,
        name: &'static str,
        items: Vec<T>,
    ) -> Vec<T> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let (before, node, after) = self.rewrite(parent, name, Some(i), item.into());
            out.extend(before.into_iter().map(|n| T::from_node(n, name)));
            if let Some(node) = node {
                out.push(T::from_node(node, name));
            }
            out.extend(after.into_iter().map(|n| T::from_node(n, name)));
        }
        out
    }

    #[allow(clippy::too_many_lines)]
    fn rewrite_children(&mut self, node: Node) -> Node {
        match node {
            Node::File(mut file) => {
                file.stmts = self.list("File", "stmts", file.stmts);
                Node::File(file)
            }
            Node::Stmt(stmt) => Node::Stmt(match stmt {
                Stmt::Query(query) => Stmt::Query(self.slot_box("QueryStmt", "query", query)),
                Stmt::Insert(mut insert) => {
                    insert.table_name = self.slot("InsertStmt", "table_name", insert.table_name);
                    insert.columns = self.list("InsertStmt", "columns", insert.columns);
                    insert.source = match insert.source {
                        InsertSource::Values(rows) => InsertSource::Values(
                            rows.into_iter()
                                .map(|row| self.list("InsertStmt", "values", row))
                                .collect(),
                        ),
                        InsertSource::Query(query) => {
                            InsertSource::Query(self.slot_box("InsertStmt", "source", query))
                        }
                    };
                    Stmt::Insert(insert)
                }
                Stmt::Update(mut update) => {
                    update.table_name = self.slot("UpdateStmt", "table_name", update.table_name);
                    update.assignments = self.list("UpdateStmt", "assignments", update.assignments);
                    update.selection = self.slot_opt("UpdateStmt", "selection", update.selection);
                    Stmt::Update(update)
                }
                Stmt::Delete(mut delete) => {
                    delete.table_name = self.slot("DeleteStmt", "table_name", delete.table_name);
                    delete.selection = self.slot_opt("DeleteStmt", "selection", delete.selection);
                    Stmt::Delete(delete)
                }
                Stmt::CreateTable(mut create) => {
                    create.name = self.slot("CreateTableStmt", "name", create.name);
                    create.elements = self.list("CreateTableStmt", "elements", create.elements);
                    Stmt::CreateTable(create)
                }
                Stmt::CreateVirtualTable(mut create) => {
                    create.name = self.slot("CreateVirtualTableStmt", "name", create.name);
                    create.module = self.slot("CreateVirtualTableStmt", "module", create.module);
                    create.args = self.list("CreateVirtualTableStmt", "args", create.args);
                    Stmt::CreateVirtualTable(create)
                }
                Stmt::CreateIndex(mut create) => {
                    create.name = self.slot("CreateIndexStmt", "name", create.name);
                    create.table_name =
                        self.slot("CreateIndexStmt", "table_name", create.table_name);
                    create.method = self.slot_opt("CreateIndexStmt", "method", create.method);
                    create.columns = self.list("CreateIndexStmt", "columns", create.columns);
                    create.selection = self.slot_opt("CreateIndexStmt", "selection", create.selection);
                    Stmt::CreateIndex(create)
                }
                Stmt::AlterTable(mut alter) => {
                    alter.table_name = self.slot("AlterTableStmt", "table_name", alter.table_name);
                    alter.action = match alter.action {
                        AlterTableAction::AddColumn { column } => AlterTableAction::AddColumn {
                            column: self.slot("AlterTableStmt", "column", column),
                        },
                        AlterTableAction::AddConstraint { constraint } => {
                            AlterTableAction::AddConstraint {
                                constraint: self.slot("AlterTableStmt", "constraint", constraint),
                            }
                        }
                        AlterTableAction::DropColumn { name, cascade } => {
                            AlterTableAction::DropColumn {
                                name: self.slot("AlterTableStmt", "name", name),
                                cascade,
                            }
                        }
                        AlterTableAction::DropConstraint { name, cascade } => {
                            AlterTableAction::DropConstraint {
                                name: self.slot("AlterTableStmt", "name", name),
                                cascade,
                            }
                        }
                        AlterTableAction::AlterColumn { name, op } => {
                            AlterTableAction::AlterColumn {
                                name: self.slot("AlterTableStmt", "name", name),
                                op: match op {
                                    AlterColumnAction::SetDefault(expr) => {
                                        AlterColumnAction::SetDefault(
                                            self.slot("AlterTableStmt", "default", expr),
                                        )
                                    }
                                    other => other,
                                },
                            }
                        }
                        AlterTableAction::RenameTable { new_name } => {
                            AlterTableAction::RenameTable {
                                new_name: self.slot("AlterTableStmt", "new_name", new_name),
                            }
                        }
                        AlterTableAction::RenameColumn { old_name, new_name } => {
                            AlterTableAction::RenameColumn {
                                old_name: self.slot("AlterTableStmt", "old_name", old_name),
                                new_name: self.slot("AlterTableStmt", "new_name", new_name),
                            }
                        }
                    };
                    Stmt::AlterTable(alter)
                }
                Stmt::DropTable(mut drop) => {
                    drop.names = self.list("DropTableStmt", "names", drop.names);
                    Stmt::DropTable(drop)
                }
                Stmt::DropIndex(mut drop) => {
                    drop.names = self.list("DropIndexStmt", "names", drop.names);
                    Stmt::DropIndex(drop)
                }
            }),
            Node::Query(mut query) => {
                query.ctes = self.list("Query", "ctes", query.ctes);
                query.body = self.slot_box("Query", "body", query.body);
                query.order_by = self.list("Query", "order_by", query.order_by);
                query.limit = self.slot_opt("Query", "limit", query.limit);
                Node::Query(query)
            }
            Node::Cte(mut cte) => {
                cte.alias = self.slot("Cte", "alias", cte.alias);
                cte.query = self.slot_box("Cte", "query", cte.query);
                Node::Cte(cte)
            }
            Node::Select(mut select) => {
                select.projection = self.list("SqlSelect", "projection", select.projection);
                select.from = self.list("SqlSelect", "from", select.from);
                select.selection = self.slot_opt("SqlSelect", "selection", select.selection);
                select.group_by = self.list("SqlSelect", "group_by", select.group_by);
                select.having = self.slot_opt("SqlSelect", "having", select.having);
                Node::Select(select)
            }
            Node::SelectItem(item) => Node::SelectItem(match item {
                SelectItem::UnnamedExpr(expr) => {
                    SelectItem::UnnamedExpr(self.slot("SelectItem", "expr", expr))
                }
                SelectItem::ExprWithAlias { expr, alias } => SelectItem::ExprWithAlias {
                    expr: self.slot("SelectItem", "expr", expr),
                    alias: self.slot("SelectItem", "alias", alias),
                },
                SelectItem::QualifiedWildcard { prefix, to } => SelectItem::QualifiedWildcard {
                    prefix: self.slot("SelectItem", "prefix", prefix),
                    to,
                },
                wildcard @ SelectItem::Wildcard(_) => wildcard,
            }),
            Node::TableFactor(factor) => Node::TableFactor(match factor {
                TableFactor::Table { name, alias } => TableFactor::Table {
                    name: self.slot("TableFactor", "name", name),
                    alias: self.slot_opt("TableFactor", "alias", alias),
                },
                TableFactor::Derived {
                    span,
                    subquery,
                    alias,
                } => TableFactor::Derived {
                    span,
                    subquery: self.slot_box("TableFactor", "subquery", subquery),
                    alias: self.slot_opt("TableFactor", "alias", alias),
                },
                TableFactor::Join { left, join } => TableFactor::Join {
                    left: self.slot_box("TableFactor", "left", left),
                    join: self.slot_box("TableFactor", "join", join),
                },
            }),
            Node::JoinClause(mut join) => {
                join.right = self.slot_box("JoinClause", "right", join.right);
                join.constraint = match join.constraint {
                    JoinConstraint::On(expr) => {
                        JoinConstraint::On(self.slot("JoinClause", "on", expr))
                    }
                    JoinConstraint::Using(columns) => {
                        JoinConstraint::Using(self.list("JoinClause", "using", columns))
                    }
                    JoinConstraint::None => JoinConstraint::None,
                };
                Node::JoinClause(join)
            }
            Node::OrderByExpr(mut order_by) => {
                order_by.expr = self.slot_box("OrderByExpr", "expr", order_by.expr);
                Node::OrderByExpr(order_by)
            }
            Node::LimitExpr(mut limit) => {
                limit.quantity = self.slot("LimitExpr", "quantity", limit.quantity);
                limit.offset = self.slot_opt("LimitExpr", "offset", limit.offset);
                Node::LimitExpr(limit)
            }
            Node::Expr(expr) => Node::Expr(match expr {
                leaf @ (Expr::Identifier(_) | Expr::Wildcard(_) | Expr::Value { .. }) => leaf,
                Expr::CompoundIdentifier(idents) => {
                    Expr::CompoundIdentifier(self.list("CompoundIdent", "idents", idents))
                }
                Expr::QualifiedWildcard { prefix, to } => Expr::QualifiedWildcard {
                    prefix: self.list("QualifiedWildcard", "prefix", prefix),
                    to,
                },
                Expr::IsNull { expr, to } => Expr::IsNull {
                    expr: self.slot_box("IsNull", "expr", expr),
                    to,
                },
                Expr::IsNotNull { expr, to } => Expr::IsNotNull {
                    expr: self.slot_box("IsNotNull", "expr", expr),
                    to,
                },
                Expr::InList {
                    expr,
                    list,
                    negated,
                    rparen,
                } => Expr::InList {
                    expr: self.slot_box("InList", "expr", expr),
                    list: self.list("InList", "list", list),
                    negated,
                    rparen,
                },
                Expr::InSubquery {
                    expr,
                    subquery,
                    negated,
                    rparen,
                } => Expr::InSubquery {
                    expr: self.slot_box("InSubQuery", "expr", expr),
                    subquery: self.slot_box("InSubQuery", "subquery", subquery),
                    negated,
                    rparen,
                },
                Expr::Between {
                    expr,
                    negated,
                    low,
                    high,
                } => Expr::Between {
                    expr: self.slot_box("Between", "expr", expr),
                    negated,
                    low: self.slot_box("Between", "low", low),
                    high: self.slot_box("Between", "high", high),
                },
                Expr::BinaryOp { left, op, right } => Expr::BinaryOp {
                    left: self.slot_box("BinaryExpr", "left", left),
                    op,
                    right: self.slot_box("BinaryExpr", "right", right),
                },
                Expr::UnaryOp { from, op, expr } => Expr::UnaryOp {
                    from,
                    op,
                    expr: self.slot_box("UnaryExpr", "expr", expr),
                },
                Expr::Cast {
                    expr,
                    data_type,
                    span,
                } => Expr::Cast {
                    expr: self.slot_box("Cast", "expr", expr),
                    data_type,
                    span,
                },
                Expr::Nested { expr, span } => Expr::Nested {
                    expr: self.slot_box("Nested", "expr", expr),
                    span,
                },
                Expr::Function(mut function) => {
                    function.name = self.slot("Function", "name", function.name);
                    function.args = self.list("Function", "args", function.args);
                    Expr::Function(function)
                }
                Expr::Case(mut case) => {
                    case.operand = case
                        .operand
                        .map(|operand| Box::new(self.slot("Case", "operand", *operand)));
                    case.conditions = self.list("Case", "conditions", case.conditions);
                    case.results = self.list("Case", "results", case.results);
                    case.else_result = case
                        .else_result
                        .map(|e| Box::new(self.slot("Case", "else_result", *e)));
                    Expr::Case(case)
                }
                Expr::Exists {
                    negated,
                    subquery,
                    span,
                } => Expr::Exists {
                    negated,
                    subquery: self.slot_box("Exists", "subquery", subquery),
                    span,
                },
                Expr::Subquery { query, span } => Expr::Subquery {
                    query: self.slot_box("SubQuery", "query", query),
                    span,
                },
            }),
            leaf @ Node::Ident(_) => leaf,
            Node::ObjectName(mut name) => {
                name.0 = self.list("ObjectName", "idents", name.0);
                Node::ObjectName(name)
            }
            Node::ColumnDef(mut column) => {
                column.name = self.slot("ColumnDef", "name", column.name);
                column.constraints = self.list("ColumnDef", "constraints", column.constraints);
                Node::ColumnDef(column)
            }
            Node::ColumnConstraint(mut constraint) => {
                constraint.name = self.slot_opt("ColumnConstraint", "name", constraint.name);
                constraint.spec = match constraint.spec {
                    ColumnConstraintKind::Check(expr) => {
                        ColumnConstraintKind::Check(self.slot("ColumnConstraint", "check", expr))
                    }
                    ColumnConstraintKind::Default(expr) => ColumnConstraintKind::Default(
                        self.slot("ColumnConstraint", "default", expr),
                    ),
                    ColumnConstraintKind::References { table, columns } => {
                        ColumnConstraintKind::References {
                            table: self.slot("ColumnConstraint", "table", table),
                            columns: self.list("ColumnConstraint", "columns", columns),
                        }
                    }
                    other => other,
                };
                Node::ColumnConstraint(constraint)
            }
            Node::TableConstraint(mut constraint) => {
                constraint.name = self.slot_opt("TableConstraint", "name", constraint.name);
                constraint.spec = match constraint.spec {
                    TableConstraintKind::Unique {
                        columns,
                        is_primary,
                    } => TableConstraintKind::Unique {
                        columns: self.list("TableConstraint", "columns", columns),
                        is_primary,
                    },
                    TableConstraintKind::ForeignKey {
                        columns,
                        table,
                        referred_columns,
                    } => TableConstraintKind::ForeignKey {
                        columns: self.list("TableConstraint", "columns", columns),
                        table: self.slot("TableConstraint", "table", table),
                        referred_columns: self.list(
                            "TableConstraint",
                            "referred_columns",
                            referred_columns,
                        ),
                    },
                    TableConstraintKind::Check(expr) => {
                        TableConstraintKind::Check(self.slot("TableConstraint", "check", expr))
                    }
                };
                Node::TableConstraint(constraint)
            }
            Node::VirtualTableArg(arg) => Node::VirtualTableArg(match arg {
                VirtualTableArg::Expr(expr) => {
                    VirtualTableArg::Expr(self.slot("VirtualTableArg", "expr", expr))
                }
                VirtualTableArg::Assign { name, value } => VirtualTableArg::Assign {
                    name: self.slot("VirtualTableArg", "name", name),
                    value: self.slot("VirtualTableArg", "value", value),
                },
            }),
            Node::Assignment(mut assignment) => {
                assignment.id = self.slot("Assignment", "id", assignment.id);
                assignment.value = self.slot("Assignment", "value", assignment.value);
                Node::Assignment(assignment)
            }
        }
    }
}
