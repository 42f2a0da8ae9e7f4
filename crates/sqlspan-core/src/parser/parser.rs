//! Recursive descent SQL parser with Pratt expression parsing.

use crate::ast::AstNode as _;
use crate::ast::{
    AlterColumnAction, AlterTableAction, AlterTableStmt, Assignment, CaseExpr, ColumnConstraint,
    ColumnConstraintKind, ColumnDef, Comment, CommentGroup, CreateIndexStmt, CreateTableStmt,
    CreateVirtualTableStmt, Cte, DataType, DeleteStmt, DropIndexStmt, DropTableStmt, Expr, File,
    Ident, InsertSource, InsertStmt, JoinClause, JoinConstraint, JoinOperator, LimitExpr,
    ObjectName, OrderByExpr, Query, SelectItem, SqlSelect, Stmt, TableConstraint,
    TableConstraintKind, TableElement, TableFactor, UnaryOperator, UpdateStmt, Value,
    VirtualTableArg,
};
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::lexer::{Keyword, Pos, Span, Token, TokenKind, Tokenizer, TokenizerOptions, Word};

use super::pratt::{
    binary_operator, infix_precedence, CMP_PREC, UNARY_NOT_PREC, UNARY_SIGN_PREC,
};

/// Parser options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Park comment tokens into `File.comments`. Off by default.
    pub parse_comment: bool,
}

/// An SQL parser over an eagerly tokenized input.
///
/// Whitespace is filtered out after tokenization; comments are grouped
/// and parked on the side when enabled. A parser instance is not safe
/// for concurrent use; independent instances are.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    comments: Vec<CommentGroup>,
    eof_pos: Pos,
}

impl Parser {
    /// Creates a parser with default options.
    ///
    /// # Errors
    ///
    /// Returns tokenizer errors (unterminated string or comment).
    pub fn new(sql: &str, dialect: &dyn Dialect) -> Result<Self, ParseError> {
        Self::new_with_options(sql, dialect, ParserOptions::default())
    }

    /// Creates a parser with explicit options. The input is tokenized
    /// eagerly; all further work happens over the in-memory tokens.
    ///
    /// # Errors
    ///
    /// Returns tokenizer errors (unterminated string or comment).
    pub fn new_with_options(
        sql: &str,
        dialect: &dyn Dialect,
        options: ParserOptions,
    ) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::with_options(
            sql,
            dialect,
            TokenizerOptions {
                parse_comment: options.parse_comment,
            },
        );
        let raw = tokenizer.tokenize()?;
        let eof_pos = tokenizer.pos();

        let mut tokens = Vec::with_capacity(raw.len());
        let mut comments: Vec<CommentGroup> = Vec::new();
        // Line of the last non-comment token, to tell trailing comments
        // (after code) from comments that start their own line.
        let mut last_code_line: Option<u32> = None;
        // (end, starts_its_line) of the previous comment.
        let mut prev_comment: Option<(Pos, bool)> = None;

        for token in raw {
            match token.kind {
                TokenKind::Whitespace(_) => {}
                TokenKind::Comment(text) => {
                    let comment = Comment {
                        text,
                        span: Span::new(token.from, token.to),
                    };
                    let starts_line = last_code_line != Some(token.from.line);
                    let merges = match prev_comment {
                        Some((prev_to, prev_starts_line)) => {
                            token.from.line == prev_to.line
                                || (token.from.line == prev_to.line + 1 && prev_starts_line)
                        }
                        None => false,
                    };
                    if merges {
                        comments
                            .last_mut()
                            .expect("merge implies a previous group")
                            .list
                            .push(comment);
                    } else {
                        comments.push(CommentGroup {
                            list: vec![comment],
                        });
                    }
                    prev_comment = Some((token.to, starts_line));
                }
                _ => {
                    last_code_line = Some(token.from.line);
                    prev_comment = None;
                    tokens.push(token);
                }
            }
        }

        Ok(Self {
            tokens,
            index: 0,
            comments,
            eof_pos,
        })
    }

    /// Parses exactly one statement. A trailing `;` is consumed if
    /// present; anything after it is an error.
    ///
    /// # Errors
    ///
    /// Returns the first grammar error encountered.
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let stmt = self.parse_stmt()?;
        self.consume(&TokenKind::Semicolon);
        match self.peek() {
            Some(token) => Err(ParseError::UnexpectedToken {
                pos: token.from,
                expected: "end of statement".into(),
                found: token.kind.to_string(),
            }),
            None => Ok(stmt),
        }
    }

    /// Parses `;`-separated statements until EOF. Parked comment
    /// groups end up in `File.comments`.
    ///
    /// # Errors
    ///
    /// Stops at the first grammar error.
    pub fn parse_file(&mut self) -> Result<File, ParseError> {
        let mut stmts = Vec::new();
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            if self.peek().is_none() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok(File {
            stmts,
            comments: std::mem::take(&mut self.comments),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "a statement".into(),
            });
        };
        let TokenKind::Word(word) = &token.kind else {
            return Err(self.unexpected("a statement"));
        };
        match word.keyword {
            Some(Keyword::Select) | Some(Keyword::With) if word.quote_style.is_none() => {
                Ok(Stmt::Query(Box::new(self.parse_query()?)))
            }
            Some(Keyword::Insert) if word.quote_style.is_none() => self.parse_insert(),
            Some(Keyword::Update) if word.quote_style.is_none() => self.parse_update(),
            Some(Keyword::Delete) if word.quote_style.is_none() => self.parse_delete(),
            Some(Keyword::Create) if word.quote_style.is_none() => self.parse_create(),
            Some(Keyword::Alter) if word.quote_style.is_none() => self.parse_alter(),
            Some(Keyword::Drop) if word.quote_style.is_none() => self.parse_drop(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    // --- Queries ---

    fn parse_query(&mut self) -> Result<Query, ParseError> {
        let from = self.current_pos();

        let ctes = if self.parse_keyword(Keyword::With) {
            self.parse_comma_separated(Self::parse_cte)?
        } else {
            Vec::new()
        };

        let body = self.parse_select_body()?;

        let order_by = if self.parse_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_order_by_expr)?
        } else {
            Vec::new()
        };

        let limit = if self.check_keyword(Keyword::Limit) {
            let limit_from = self.current_pos();
            self.advance();
            let quantity = self.parse_expr()?;
            let offset = if self.parse_keyword(Keyword::Offset) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            Some(LimitExpr {
                span: Span::new(limit_from, self.prev_end()),
                quantity,
                offset,
            })
        } else {
            None
        };

        Ok(Query {
            span: Span::new(from, self.prev_end()),
            ctes,
            body: Box::new(body),
            order_by,
            limit,
        })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let alias = self.parse_ident()?;
        let from = alias.span.from;
        self.expect_keyword(Keyword::As)?;
        self.expect_token(&TokenKind::LParen)?;
        let query = self.parse_query()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Cte {
            span: Span::new(from, self.prev_end()),
            alias,
            query: Box::new(query),
        })
    }

    fn parse_select_body(&mut self) -> Result<SqlSelect, ParseError> {
        let from_pos = self.current_pos();
        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.parse_keyword(Keyword::Distinct) {
            true
        } else {
            self.parse_keyword(Keyword::All);
            false
        };

        let projection = self.parse_comma_separated(Self::parse_select_item)?;

        let from = if self.parse_keyword(Keyword::From) {
            self.parse_comma_separated(Self::parse_table_reference)?
        } else {
            Vec::new()
        };

        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.parse_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            Vec::new()
        };

        let having = if self.parse_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(SqlSelect {
            span: Span::new(from_pos, self.prev_end()),
            distinct,
            projection,
            from,
            selection,
            group_by,
            having,
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        let expr = self.parse_expr()?;
        match expr {
            Expr::Wildcard(span) => Ok(SelectItem::Wildcard(span)),
            Expr::QualifiedWildcard { prefix, to } => Ok(SelectItem::QualifiedWildcard {
                prefix: ObjectName(prefix),
                to,
            }),
            expr => {
                if self.parse_keyword(Keyword::As) {
                    let alias = self.parse_ident()?;
                    Ok(SelectItem::ExprWithAlias { expr, alias })
                } else if let Some(alias) = self.parse_optional_alias() {
                    Ok(SelectItem::ExprWithAlias { expr, alias })
                } else {
                    Ok(SelectItem::UnnamedExpr(expr))
                }
            }
        }
    }

    fn parse_table_reference(&mut self) -> Result<TableFactor, ParseError> {
        let mut factor = self.parse_table_factor()?;
        loop {
            let join_from = self.current_pos();
            let op = if self.parse_keyword(Keyword::Join) {
                JoinOperator::Inner
            } else if self.parse_keyword(Keyword::Inner) {
                self.expect_keyword(Keyword::Join)?;
                JoinOperator::Inner
            } else if self.parse_keyword(Keyword::Left) {
                self.parse_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinOperator::LeftOuter
            } else if self.parse_keyword(Keyword::Right) {
                self.parse_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinOperator::RightOuter
            } else if self.parse_keyword(Keyword::Full) {
                self.parse_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinOperator::FullOuter
            } else if self.parse_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                JoinOperator::Cross
            } else {
                break;
            };

            let right = self.parse_table_factor()?;
            let constraint = if op == JoinOperator::Cross {
                JoinConstraint::None
            } else if self.parse_keyword(Keyword::On) {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.parse_keyword(Keyword::Using) {
                self.expect_token(&TokenKind::LParen)?;
                let columns = self.parse_comma_separated(Self::parse_ident)?;
                self.expect_token(&TokenKind::RParen)?;
                JoinConstraint::Using(columns)
            } else {
                JoinConstraint::None
            };

            factor = TableFactor::Join {
                left: Box::new(factor),
                join: Box::new(JoinClause {
                    span: Span::new(join_from, self.prev_end()),
                    op,
                    right: Box::new(right),
                    constraint,
                }),
            };
        }
        Ok(factor)
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParseError> {
        if self.check(&TokenKind::LParen) {
            let lparen = self.current_pos();
            if self.next_is_query_start() {
                self.advance();
                let subquery = self.parse_query()?;
                self.expect_token(&TokenKind::RParen)?;
                let span = Span::new(lparen, self.prev_end());
                let alias = self.parse_table_alias();
                return Ok(TableFactor::Derived {
                    span,
                    subquery: Box::new(subquery),
                    alias,
                });
            }
            // A parenthesized (nested) join group.
            self.advance();
            let inner = self.parse_table_reference()?;
            self.expect_token(&TokenKind::RParen)?;
            return Ok(inner);
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_table_alias();
        Ok(TableFactor::Table { name, alias })
    }

    /// Returns true if the token after the current `(` starts a query.
    fn next_is_query_start(&self) -> bool {
        matches!(
            self.peek_nth(1),
            Some(Token { kind: TokenKind::Word(w), .. })
                if w.quote_style.is_none()
                    && matches!(w.keyword, Some(Keyword::Select) | Some(Keyword::With))
        )
    }

    fn parse_table_alias(&mut self) -> Option<Ident> {
        self.parse_keyword(Keyword::As);
        self.parse_optional_alias()
    }

    /// Consumes a bare, unreserved word (or any quoted word) as an
    /// alias, if one is present.
    fn parse_optional_alias(&mut self) -> Option<Ident> {
        let token = self.peek()?;
        let TokenKind::Word(word) = &token.kind else {
            return None;
        };
        if word.quote_style.is_none() && word.keyword.is_some_and(|kw| kw.is_reserved()) {
            return None;
        }
        let ident = Self::word_to_ident(word, token.from, token.to);
        self.advance();
        Some(ident)
    }

    fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParseError> {
        let expr = self.parse_expr()?;
        let from = expr.span().from;
        let asc = if self.parse_keyword(Keyword::Asc) {
            Some(true)
        } else if self.parse_keyword(Keyword::Desc) {
            Some(false)
        } else {
            None
        };
        Ok(OrderByExpr {
            span: Span::new(from, self.prev_end()),
            expr: Box::new(expr),
            asc,
        })
    }

    // --- DML ---

    fn parse_insert(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.parse_object_name()?;

        let columns = if self.consume(&TokenKind::LParen) {
            let columns = self.parse_comma_separated(Self::parse_ident)?;
            self.expect_token(&TokenKind::RParen)?;
            columns
        } else {
            Vec::new()
        };

        let source = if self.parse_keyword(Keyword::Values) {
            let mut rows = Vec::new();
            loop {
                self.expect_token(&TokenKind::LParen)?;
                rows.push(self.parse_comma_separated(Self::parse_expr)?);
                self.expect_token(&TokenKind::RParen)?;
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return Err(self.unexpected("VALUES or SELECT"));
        };

        Ok(Stmt::Insert(InsertStmt {
            span: Span::new(from, self.prev_end()),
            table_name,
            columns,
            source,
        }))
    }

    fn parse_update(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Update)?;
        let table_name = self.parse_object_name()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_comma_separated(|p| {
            let id = p.parse_ident()?;
            p.expect_token(&TokenKind::Eq)?;
            let value = p.parse_expr()?;
            Ok(Assignment { id, value })
        })?;
        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::Update(UpdateStmt {
            span: Span::new(from, self.prev_end()),
            table_name,
            assignments,
            selection,
        }))
    }

    fn parse_delete(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table_name = self.parse_object_name()?;
        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::Delete(DeleteStmt {
            span: Span::new(from, self.prev_end()),
            table_name,
            selection,
        }))
    }

    // --- DDL ---

    fn parse_create(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Create)?;

        if self.parse_keyword(Keyword::Virtual) {
            self.expect_keyword(Keyword::Table)?;
            return self.parse_create_virtual_table(from);
        }
        if self.parse_keyword(Keyword::Table) {
            return self.parse_create_table(from);
        }
        let unique = self.parse_keyword(Keyword::Unique);
        self.expect_keyword(Keyword::Index)?;
        self.parse_create_index(from, unique)
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.parse_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_create_table(&mut self, from: Pos) -> Result<Stmt, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        self.expect_token(&TokenKind::LParen)?;
        let elements = self.parse_comma_separated(Self::parse_table_element)?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Stmt::CreateTable(CreateTableStmt {
            span: Span::new(from, self.prev_end()),
            if_not_exists,
            name,
            elements,
        }))
    }

    fn parse_table_element(&mut self) -> Result<TableElement, ParseError> {
        if self.check_any_keyword(&[
            Keyword::Primary,
            Keyword::Foreign,
            Keyword::Unique,
            Keyword::Check,
            Keyword::Constraint,
        ]) {
            Ok(TableElement::Constraint(self.parse_table_constraint()?))
        } else {
            Ok(TableElement::Column(self.parse_column_def()?))
        }
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let from = self.current_pos();
        let name = if self.parse_keyword(Keyword::Constraint) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let spec = if self.parse_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            TableConstraintKind::Unique {
                columns: self.parse_parenthesized_columns()?,
                is_primary: true,
            }
        } else if self.parse_keyword(Keyword::Unique) {
            TableConstraintKind::Unique {
                columns: self.parse_parenthesized_columns()?,
                is_primary: false,
            }
        } else if self.parse_keyword(Keyword::Foreign) {
            self.expect_keyword(Keyword::Key)?;
            let columns = self.parse_parenthesized_columns()?;
            self.expect_keyword(Keyword::References)?;
            let table = self.parse_object_name()?;
            let referred_columns = self.parse_parenthesized_columns()?;
            TableConstraintKind::ForeignKey {
                columns,
                table,
                referred_columns,
            }
        } else if self.parse_keyword(Keyword::Check) {
            self.expect_token(&TokenKind::LParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&TokenKind::RParen)?;
            TableConstraintKind::Check(expr)
        } else {
            return Err(self.unexpected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK"));
        };

        Ok(TableConstraint {
            span: Span::new(from, self.prev_end()),
            name,
            spec,
        })
    }

    fn parse_parenthesized_columns(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.expect_token(&TokenKind::LParen)?;
        let columns = self.parse_comma_separated(Self::parse_ident)?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(columns)
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.parse_ident()?;
        let from = name.span.from;
        let data_type = self.parse_data_type()?;

        let mut constraints = Vec::new();
        loop {
            let constraint_from = self.current_pos();
            let constraint_name = if self.parse_keyword(Keyword::Constraint) {
                Some(self.parse_ident()?)
            } else {
                None
            };

            let spec = if self.parse_keyword(Keyword::Primary) {
                self.expect_keyword(Keyword::Key)?;
                Some(ColumnConstraintKind::Unique { is_primary: true })
            } else if self.parse_keyword(Keyword::Unique) {
                Some(ColumnConstraintKind::Unique { is_primary: false })
            } else if self.parse_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                Some(ColumnConstraintKind::NotNull)
            } else if self.parse_keyword(Keyword::Check) {
                self.expect_token(&TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect_token(&TokenKind::RParen)?;
                Some(ColumnConstraintKind::Check(expr))
            } else if self.parse_keyword(Keyword::Default) {
                Some(ColumnConstraintKind::Default(self.parse_expr()?))
            } else if self.parse_keyword(Keyword::References) {
                let table = self.parse_object_name()?;
                let columns = if self.check(&TokenKind::LParen) {
                    self.parse_parenthesized_columns()?
                } else {
                    Vec::new()
                };
                Some(ColumnConstraintKind::References { table, columns })
            } else {
                None
            };

            match spec {
                Some(spec) => constraints.push(ColumnConstraint {
                    span: Span::new(constraint_from, self.prev_end()),
                    name: constraint_name,
                    spec,
                }),
                None => {
                    if constraint_name.is_some() {
                        return Err(self.unexpected("a column constraint"));
                    }
                    break;
                }
            }
        }

        Ok(ColumnDef {
            span: Span::new(from, self.prev_end()),
            name,
            data_type,
            constraints,
        })
    }

    fn parse_create_virtual_table(&mut self, from: Pos) -> Result<Stmt, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::Using)?;
        let module = self.parse_ident()?;

        let args = if self.consume(&TokenKind::LParen) {
            let args = self.parse_comma_separated(Self::parse_virtual_table_arg)?;
            self.expect_token(&TokenKind::RParen)?;
            args
        } else {
            Vec::new()
        };

        Ok(Stmt::CreateVirtualTable(CreateVirtualTableStmt {
            span: Span::new(from, self.prev_end()),
            if_not_exists,
            name,
            module,
            args,
        }))
    }

    fn parse_virtual_table_arg(&mut self) -> Result<VirtualTableArg, ParseError> {
        // `name = expr` arguments need two tokens of lookahead.
        if matches!(self.peek_kind(), Some(TokenKind::Word(_)))
            && matches!(self.peek_nth(1).map(|t| &t.kind), Some(TokenKind::Eq))
        {
            let name = self.parse_ident()?;
            self.expect_token(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            return Ok(VirtualTableArg::Assign { name, value });
        }
        Ok(VirtualTableArg::Expr(self.parse_expr()?))
    }

    fn parse_create_index(&mut self, from: Pos, unique: bool) -> Result<Stmt, ParseError> {
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::On)?;
        let table_name = self.parse_object_name()?;
        let method = if self.parse_keyword(Keyword::Using) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        let columns = self.parse_parenthesized_columns()?;
        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::CreateIndex(CreateIndexStmt {
            span: Span::new(from, self.prev_end()),
            unique,
            name,
            table_name,
            method,
            columns,
            selection,
        }))
    }

    fn parse_alter(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let table_name = self.parse_object_name()?;

        let action = if self.parse_keyword(Keyword::Add) {
            if self.check_any_keyword(&[
                Keyword::Primary,
                Keyword::Foreign,
                Keyword::Unique,
                Keyword::Check,
                Keyword::Constraint,
            ]) {
                AlterTableAction::AddConstraint {
                    constraint: self.parse_table_constraint()?,
                }
            } else {
                self.parse_keyword(Keyword::Column);
                AlterTableAction::AddColumn {
                    column: self.parse_column_def()?,
                }
            }
        } else if self.parse_keyword(Keyword::Drop) {
            if self.parse_keyword(Keyword::Constraint) {
                let name = self.parse_ident()?;
                let cascade = self.parse_keyword(Keyword::Cascade);
                AlterTableAction::DropConstraint { name, cascade }
            } else {
                self.parse_keyword(Keyword::Column);
                let name = self.parse_ident()?;
                let cascade = self.parse_keyword(Keyword::Cascade);
                AlterTableAction::DropColumn { name, cascade }
            }
        } else if self.parse_keyword(Keyword::Alter) {
            self.parse_keyword(Keyword::Column);
            let name = self.parse_ident()?;
            let op = if self.parse_bare_word("TYPE") {
                AlterColumnAction::SetType(self.parse_data_type()?)
            } else if self.parse_keyword(Keyword::Set) {
                if self.parse_keyword(Keyword::Default) {
                    AlterColumnAction::SetDefault(self.parse_expr()?)
                } else {
                    self.expect_keyword(Keyword::Not)?;
                    self.expect_keyword(Keyword::Null)?;
                    AlterColumnAction::SetNotNull
                }
            } else if self.parse_keyword(Keyword::Drop) {
                if self.parse_keyword(Keyword::Default) {
                    AlterColumnAction::DropDefault
                } else {
                    self.expect_keyword(Keyword::Not)?;
                    self.expect_keyword(Keyword::Null)?;
                    AlterColumnAction::DropNotNull
                }
            } else {
                return Err(self.unexpected("TYPE, SET or DROP"));
            };
            AlterTableAction::AlterColumn { name, op }
        } else if self.parse_keyword(Keyword::Rename) {
            if self.parse_keyword(Keyword::To) {
                AlterTableAction::RenameTable {
                    new_name: self.parse_object_name()?,
                }
            } else {
                self.parse_keyword(Keyword::Column);
                let old_name = self.parse_ident()?;
                self.expect_keyword(Keyword::To)?;
                let new_name = self.parse_ident()?;
                AlterTableAction::RenameColumn { old_name, new_name }
            }
        } else {
            return Err(self.unexpected("ADD, DROP, ALTER or RENAME"));
        };

        Ok(Stmt::AlterTable(AlterTableStmt {
            span: Span::new(from, self.prev_end()),
            table_name,
            action,
        }))
    }

    fn parse_drop(&mut self) -> Result<Stmt, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Drop)?;

        if self.parse_keyword(Keyword::Table) {
            let if_exists = if self.parse_keyword(Keyword::If) {
                self.expect_keyword(Keyword::Exists)?;
                true
            } else {
                false
            };
            let names = self.parse_comma_separated(Self::parse_object_name)?;
            let cascade = self.parse_keyword(Keyword::Cascade);
            return Ok(Stmt::DropTable(DropTableStmt {
                span: Span::new(from, self.prev_end()),
                if_exists,
                names,
                cascade,
            }));
        }

        self.expect_keyword(Keyword::Index)?;
        let names = self.parse_comma_separated(Self::parse_object_name)?;
        Ok(Stmt::DropIndex(DropIndexStmt {
            span: Span::new(from, self.prev_end()),
            names,
        }))
    }

    // --- Expressions ---

    /// Parses an expression (Pratt, lowest precedence).
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_subexpr(0)
    }

    fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParseError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next = self.next_precedence();
            if precedence >= next {
                break;
            }
            expr = self.parse_infix(expr, next)?;
        }
        Ok(expr)
    }

    fn next_precedence(&self) -> u8 {
        let Some(token) = self.peek() else {
            return 0;
        };
        if let TokenKind::Word(word) = &token.kind {
            if word.is_keyword(Keyword::Not) {
                // NOT is infix only in `NOT IN`, `NOT BETWEEN`,
                // `NOT LIKE`.
                return match self.peek_nth(1) {
                    Some(next) if next.is_keyword(Keyword::In)
                        || next.is_keyword(Keyword::Between)
                        || next.is_keyword(Keyword::Like) => CMP_PREC,
                    _ => 0,
                };
            }
        }
        infix_precedence(&token.kind)
    }

    fn parse_infix(&mut self, expr: Expr, precedence: u8) -> Result<Expr, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "an operator".into(),
            });
        };

        if let TokenKind::Word(word) = &token.kind {
            if word.quote_style.is_none() {
                match word.keyword {
                    Some(Keyword::Is) => {
                        self.advance();
                        let negated = self.parse_keyword(Keyword::Not);
                        self.expect_keyword(Keyword::Null)?;
                        let to = self.prev_end();
                        return Ok(if negated {
                            Expr::IsNotNull {
                                expr: Box::new(expr),
                                to,
                            }
                        } else {
                            Expr::IsNull {
                                expr: Box::new(expr),
                                to,
                            }
                        });
                    }
                    Some(Keyword::In) => {
                        self.advance();
                        return self.parse_in(expr, false);
                    }
                    Some(Keyword::Between) => {
                        self.advance();
                        return self.parse_between(expr, false);
                    }
                    Some(Keyword::Not) => {
                        self.advance();
                        if self.parse_keyword(Keyword::In) {
                            return self.parse_in(expr, true);
                        }
                        if self.parse_keyword(Keyword::Between) {
                            return self.parse_between(expr, true);
                        }
                        self.expect_keyword(Keyword::Like)?;
                        let right = self.parse_subexpr(precedence)?;
                        return Ok(Expr::BinaryOp {
                            left: Box::new(expr),
                            op: crate::ast::BinaryOperator::NotLike,
                            right: Box::new(right),
                        });
                    }
                    _ => {}
                }
            }
        }

        if token.kind == TokenKind::DoubleColon {
            self.advance();
            let data_type = self.parse_data_type()?;
            let span = Span::new(expr.span().from, self.prev_end());
            return Ok(Expr::Cast {
                expr: Box::new(expr),
                data_type,
                span,
            });
        }

        if let Some(op) = binary_operator(&token.kind) {
            self.advance();
            let right = self.parse_subexpr(precedence)?;
            return Ok(Expr::BinaryOp {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            });
        }

        Err(self.unexpected("an operator"))
    }

    fn parse_in(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        self.expect_token(&TokenKind::LParen)?;
        if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            let subquery = self.parse_query()?;
            self.expect_token(&TokenKind::RParen)?;
            Ok(Expr::InSubquery {
                expr: Box::new(expr),
                subquery: Box::new(subquery),
                negated,
                rparen: self.prev_end(),
            })
        } else {
            let list = self.parse_comma_separated(Self::parse_expr)?;
            self.expect_token(&TokenKind::RParen)?;
            Ok(Expr::InList {
                expr: Box::new(expr),
                list,
                negated,
                rparen: self.prev_end(),
            })
        }
    }

    fn parse_between(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        // Bounds parse at comparison precedence so the separating AND
        // stays a separator.
        let low = self.parse_subexpr(CMP_PREC)?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_subexpr(CMP_PREC)?;
        Ok(Expr::Between {
            expr: Box::new(expr),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "an expression".into(),
            });
        };

        match &token.kind {
            TokenKind::Word(word) if word.quote_style.is_none() && word.keyword.is_some() => {
                match word.keyword.expect("checked above") {
                    Keyword::True => {
                        self.advance();
                        Ok(Expr::Value {
                            value: Value::Boolean(true),
                            span: Span::new(token.from, token.to),
                        })
                    }
                    Keyword::False => {
                        self.advance();
                        Ok(Expr::Value {
                            value: Value::Boolean(false),
                            span: Span::new(token.from, token.to),
                        })
                    }
                    Keyword::Null => {
                        self.advance();
                        Ok(Expr::Value {
                            value: Value::Null,
                            span: Span::new(token.from, token.to),
                        })
                    }
                    kw @ (Keyword::Date | Keyword::Time | Keyword::Timestamp)
                        if matches!(
                            self.peek_nth(1).map(|t| &t.kind),
                            Some(TokenKind::SingleQuotedString(_))
                        ) =>
                    {
                        self.advance();
                        let Some(Token {
                            kind: TokenKind::SingleQuotedString(text),
                            to,
                            ..
                        }) = self.peek().cloned()
                        else {
                            unreachable!("guarded by the match arm");
                        };
                        self.advance();
                        let value = match kw {
                            Keyword::Date => Value::Date(text),
                            Keyword::Time => Value::Time(text),
                            _ => Value::Timestamp(text),
                        };
                        Ok(Expr::Value {
                            value,
                            span: Span::new(token.from, to),
                        })
                    }
                    Keyword::Case => self.parse_case(),
                    Keyword::Cast => {
                        self.advance();
                        self.expect_token(&TokenKind::LParen)?;
                        let expr = self.parse_expr()?;
                        self.expect_keyword(Keyword::As)?;
                        let data_type = self.parse_data_type()?;
                        self.expect_token(&TokenKind::RParen)?;
                        Ok(Expr::Cast {
                            expr: Box::new(expr),
                            data_type,
                            span: Span::new(token.from, self.prev_end()),
                        })
                    }
                    Keyword::Exists => {
                        self.advance();
                        self.parse_exists(token.from, false)
                    }
                    Keyword::Not => {
                        self.advance();
                        if self.check_keyword(Keyword::Exists) {
                            self.advance();
                            return self.parse_exists(token.from, true);
                        }
                        let expr = self.parse_subexpr(UNARY_NOT_PREC)?;
                        Ok(Expr::UnaryOp {
                            from: token.from,
                            op: UnaryOperator::Not,
                            expr: Box::new(expr),
                        })
                    }
                    kw if kw.is_reserved() => Err(ParseError::UnexpectedKeyword {
                        pos: token.from,
                        keyword: kw.as_str().into(),
                    }),
                    // Non-reserved keywords are plain identifiers here.
                    _ => self.parse_ident_expr(),
                }
            }
            TokenKind::Word(_) => self.parse_ident_expr(),
            TokenKind::Number(text) => {
                self.advance();
                let span = Span::new(token.from, token.to);
                let value = if text.contains('.') {
                    Value::Double(text.parse::<f64>().map_err(|_| {
                        ParseError::UnexpectedToken {
                            pos: token.from,
                            expected: "a numeric literal".into(),
                            found: text.clone(),
                        }
                    })?)
                } else {
                    Value::Long(text.parse::<i64>().map_err(|_| {
                        ParseError::UnexpectedToken {
                            pos: token.from,
                            expected: "a numeric literal".into(),
                            found: text.clone(),
                        }
                    })?)
                };
                Ok(Expr::Value {
                    value,
                    span,
                })
            }
            TokenKind::SingleQuotedString(text) => {
                let value = Value::SingleQuotedString(text.clone());
                self.advance();
                Ok(Expr::Value {
                    value,
                    span: Span::new(token.from, token.to),
                })
            }
            TokenKind::NationalStringLiteral(text) => {
                let value = Value::NationalStringLiteral(text.clone());
                self.advance();
                Ok(Expr::Value {
                    value,
                    span: Span::new(token.from, token.to),
                })
            }
            TokenKind::Mult => {
                self.advance();
                Ok(Expr::Wildcard(Span::new(token.from, token.to)))
            }
            TokenKind::Plus => {
                self.advance();
                let expr = self.parse_subexpr(UNARY_SIGN_PREC)?;
                Ok(Expr::UnaryOp {
                    from: token.from,
                    op: UnaryOperator::Plus,
                    expr: Box::new(expr),
                })
            }
            TokenKind::Minus => {
                self.advance();
                let expr = self.parse_subexpr(UNARY_SIGN_PREC)?;
                Ok(Expr::UnaryOp {
                    from: token.from,
                    op: UnaryOperator::Minus,
                    expr: Box::new(expr),
                })
            }
            TokenKind::LParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
                    let query = self.parse_query()?;
                    self.expect_token(&TokenKind::RParen)?;
                    Ok(Expr::Subquery {
                        query: Box::new(query),
                        span: Span::new(token.from, self.prev_end()),
                    })
                } else {
                    let expr = self.parse_expr()?;
                    self.expect_token(&TokenKind::RParen)?;
                    Ok(Expr::Nested {
                        expr: Box::new(expr),
                        span: Span::new(token.from, self.prev_end()),
                    })
                }
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_exists(&mut self, from: Pos, negated: bool) -> Result<Expr, ParseError> {
        self.expect_token(&TokenKind::LParen)?;
        let subquery = self.parse_query()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Exists {
            negated,
            subquery: Box::new(subquery),
            span: Span::new(from, self.prev_end()),
        })
    }

    /// Parses an identifier-led expression: a plain or compound
    /// identifier, a qualified wildcard or a function call.
    fn parse_ident_expr(&mut self) -> Result<Expr, ParseError> {
        let mut idents = vec![self.parse_ident()?];
        while self.check(&TokenKind::Period) {
            self.advance();
            if self.check(&TokenKind::Mult) {
                let star = self.peek().expect("checked above").clone();
                self.advance();
                return Ok(Expr::QualifiedWildcard {
                    prefix: idents,
                    to: star.to,
                });
            }
            idents.push(self.parse_ident()?);
        }

        if self.check(&TokenKind::LParen) {
            self.advance();
            let args = if self.check(&TokenKind::RParen) {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_expr)?
            };
            self.expect_token(&TokenKind::RParen)?;
            return Ok(Expr::Function(crate::ast::Function {
                name: ObjectName(idents),
                args,
                rparen: self.prev_end(),
            }));
        }

        if idents.len() == 1 {
            Ok(Expr::Identifier(idents.pop().expect("one element")))
        } else {
            Ok(Expr::CompoundIdentifier(idents))
        }
    }

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        let from = self.current_pos();
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut conditions = Vec::new();
        let mut results = Vec::new();
        while self.parse_keyword(Keyword::When) {
            conditions.push(self.parse_expr()?);
            self.expect_keyword(Keyword::Then)?;
            results.push(self.parse_expr()?);
        }

        let else_result = if self.parse_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case(CaseExpr {
            span: Span::new(from, self.prev_end()),
            operand,
            conditions,
            results,
            else_result,
        }))
    }

    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "a data type".into(),
            });
        };
        let TokenKind::Word(word) = &token.kind else {
            return Err(self.unexpected("a data type"));
        };

        let data_type = match word.keyword {
            Some(Keyword::Int) | Some(Keyword::Integer) => {
                self.advance();
                DataType::Int
            }
            Some(Keyword::Smallint) => {
                self.advance();
                DataType::SmallInt
            }
            Some(Keyword::Bigint) => {
                self.advance();
                DataType::BigInt
            }
            Some(Keyword::Real) => {
                self.advance();
                DataType::Real
            }
            Some(Keyword::Double) | Some(Keyword::Float) => {
                self.advance();
                DataType::Double
            }
            Some(Keyword::Decimal) | Some(Keyword::Numeric) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            Some(Keyword::Char) => {
                self.advance();
                DataType::Char(self.parse_optional_length()?)
            }
            Some(Keyword::Varchar) => {
                self.advance();
                DataType::Varchar(self.parse_optional_length()?)
            }
            Some(Keyword::Text) => {
                self.advance();
                DataType::Text
            }
            Some(Keyword::Boolean) => {
                self.advance();
                DataType::Boolean
            }
            Some(Keyword::Date) => {
                self.advance();
                DataType::Date
            }
            Some(Keyword::Time) => {
                self.advance();
                DataType::Time
            }
            Some(Keyword::Timestamp) => {
                self.advance();
                DataType::Timestamp
            }
            None => {
                let name = word.value.clone();
                self.advance();
                DataType::Custom(name)
            }
            Some(_) => return Err(self.unexpected("a data type")),
        };
        Ok(data_type)
    }

    fn parse_optional_length(&mut self) -> Result<Option<u64>, ParseError> {
        if !self.consume(&TokenKind::LParen) {
            return Ok(None);
        }
        let length = self.parse_literal_u64()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Some(length))
    }

    fn parse_optional_precision_scale(
        &mut self,
    ) -> Result<(Option<u64>, Option<u64>), ParseError> {
        if !self.consume(&TokenKind::LParen) {
            return Ok((None, None));
        }
        let precision = self.parse_literal_u64()?;
        let scale = if self.consume(&TokenKind::Comma) {
            Some(self.parse_literal_u64()?)
        } else {
            None
        };
        self.expect_token(&TokenKind::RParen)?;
        Ok((Some(precision), scale))
    }

    fn parse_literal_u64(&mut self) -> Result<u64, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "an integer".into(),
            });
        };
        match &token.kind {
            TokenKind::Number(text) => {
                let value = text.parse::<u64>().map_err(|_| ParseError::UnexpectedToken {
                    pos: token.from,
                    expected: "an integer".into(),
                    found: text.clone(),
                })?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("an integer")),
        }
    }

    // --- Identifiers ---

    fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut idents = vec![self.parse_ident()?];
        while self.consume(&TokenKind::Period) {
            idents.push(self.parse_ident()?);
        }
        Ok(ObjectName(idents))
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: "an identifier".into(),
            });
        };
        match &token.kind {
            TokenKind::Word(word) => {
                if word.quote_style.is_none() {
                    if let Some(keyword) = word.keyword {
                        if keyword.is_reserved() {
                            return Err(ParseError::UnexpectedKeyword {
                                pos: token.from,
                                keyword: keyword.as_str().into(),
                            });
                        }
                    }
                }
                let ident = Self::word_to_ident(word, token.from, token.to);
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn word_to_ident(word: &Word, from: Pos, to: Pos) -> Ident {
        Ident {
            value: word.value.clone(),
            quote_style: word.quote_style,
            span: Span::new(from, to),
        }
    }

    // --- Token helpers ---

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.index + n)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    /// Position of the next token, or EOF.
    fn current_pos(&self) -> Pos {
        self.peek().map_or(self.eof_pos, |t| t.from)
    }

    /// End position of the last consumed token.
    fn prev_end(&self) -> Pos {
        if self.index == 0 {
            Pos::default()
        } else {
            self.tokens[self.index - 1].to
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the token if it matches; returns whether it did.
    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn check_any_keyword(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|&kw| self.check_keyword(kw))
    }

    /// Consumes the keyword if present; returns whether it did.
    fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a non-reserved word with the given spelling
    /// (case-insensitive); returns whether it did.
    fn parse_bare_word(&mut self, spelling: &str) -> bool {
        let matched = matches!(
            self.peek_kind(),
            Some(TokenKind::Word(w))
                if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(spelling)
        );
        if matched {
            self.advance();
        }
        matched
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.parse_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_token(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn parse_comma_separated<T>(
        &mut self,
        mut parse: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![parse(self)?];
        while self.consume(&TokenKind::Comma) {
            items.push(parse(self)?);
        }
        Ok(items)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                pos: token.from,
                expected: expected.into(),
                found: token.kind.to_string(),
            },
            None => ParseError::UnexpectedEof {
                pos: self.eof_pos,
                expected: expected.into(),
            },
        }
    }
}
