//! Tests for comment grouping and the comment-to-node association.

mod common;
use common::*;

use sqlspan_core::ast::{CommentGroup, CommentMap, NodeRef, Stmt, TableElement};
use sqlspan_core::lexer::{Pos, Span};

fn group_texts(groups: Option<&[CommentGroup]>) -> Vec<Vec<&str>> {
    groups
        .unwrap_or(&[])
        .iter()
        .map(|g| g.list.iter().map(|c| c.text.as_str()).collect())
        .collect()
}

fn element_ref(element: &TableElement) -> NodeRef<'_> {
    match element {
        TableElement::Column(column) => NodeRef::ColumnDef(column),
        TableElement::Constraint(constraint) => NodeRef::TableConstraint(constraint),
    }
}

#[test]
fn associate_with_single_statement() {
    let file = parse_file("\n--test\nSELECT * from test;\n");
    assert_eq!(file.stmts.len(), 1);
    assert_eq!(file.comments.len(), 1);
    let comment = &file.comments[0].list[0];
    assert_eq!(comment.text, "test");
    assert_eq!(comment.span, Span::new(Pos::new(2, 1), Pos::new(2, 7)));

    let map = CommentMap::build(&file);
    assert_eq!(
        group_texts(map.get(NodeRef::Stmt(&file.stmts[0]))),
        vec![vec!["test"]]
    );
}

#[test]
fn associate_with_multiple_statements() {
    let file = parse_file(
        "\n--select\nSELECT * from test;\n\n/*\ninsert\n*/\nINSERT INTO tbl_name (col1,col2) VALUES(15,col1*2);\n",
    );
    assert_eq!(file.stmts.len(), 2);
    assert_eq!(file.comments.len(), 2);
    assert_eq!(
        file.comments[1].list[0].span,
        Span::new(Pos::new(5, 1), Pos::new(7, 3))
    );
    assert_eq!(file.comments[1].list[0].text, "\ninsert\n");

    let map = CommentMap::build(&file);
    assert_eq!(
        group_texts(map.get(NodeRef::Stmt(&file.stmts[0]))),
        vec![vec!["select"]]
    );
    assert_eq!(
        group_texts(map.get(NodeRef::Stmt(&file.stmts[1]))),
        vec![vec!["\ninsert\n"]]
    );
}

#[test]
fn associate_within_create_table() {
    let src = "\n\
/*associate with stmts1*/\n\
CREATE TABLE test (\n\
    /*associate with columndef*/\n\
    col0 int primary key, --columndef\n\
    /*with constraints*/\n\
    col1 integer constraint test_constraint check (10 < col1 and col1 < 100),\n\
    foreign key (col0, col1) references test2(col1, col2), --table constraints1\n\
    --table constraints2\n\
    CONSTRAINT test_constraint check(col1 > 10)\n\
); --associate with stmts2\n";
    let file = parse_file(src);
    assert_eq!(file.stmts.len(), 1);
    assert_eq!(file.comments.len(), 7);

    let map = CommentMap::build(&file);
    let Stmt::CreateTable(create) = &file.stmts[0] else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(create.elements.len(), 4);

    // Leading comment on the previous line and trailing comment on the
    // terminator's line both land on the statement itself.
    let stmt_groups = map.get(NodeRef::Stmt(&file.stmts[0])).unwrap();
    assert_eq!(
        group_texts(Some(stmt_groups)),
        vec![vec!["associate with stmts1"], vec!["associate with stmts2"]]
    );
    assert_eq!(
        stmt_groups[0].span(),
        Span::new(Pos::new(2, 1), Pos::new(2, 26))
    );
    assert_eq!(
        stmt_groups[1].span(),
        Span::new(Pos::new(11, 4), Pos::new(11, 27))
    );

    // Element 0 collects its leading block comment and its trailing
    // line comment, in source order.
    let col0 = map.get(element_ref(&create.elements[0])).unwrap();
    assert_eq!(
        group_texts(Some(col0)),
        vec![vec!["associate with columndef"], vec!["columndef"]]
    );
    assert_eq!(col0[0].span(), Span::new(Pos::new(4, 5), Pos::new(4, 33)));
    assert_eq!(col0[1].span(), Span::new(Pos::new(5, 27), Pos::new(5, 38)));

    assert_eq!(
        group_texts(map.get(element_ref(&create.elements[1]))),
        vec![vec!["with constraints"]]
    );
    assert_eq!(
        group_texts(map.get(element_ref(&create.elements[2]))),
        vec![vec!["table constraints1"]]
    );
    assert_eq!(
        group_texts(map.get(element_ref(&create.elements[3]))),
        vec![vec!["table constraints2"]]
    );
}

#[test]
fn comment_map_totality() {
    let src = "\n\
--eee\n\
\n\
/*fff\n\
ggg\n\
*/\n\
select 1 from test; --hhh\n\
/*jjj*/ --kkk\n\
select 1 from test; /*lll*/ --mmm\n\
--nnn\n";
    let file = parse_file(src);
    let map = CommentMap::build(&file);
    let attached: usize = map.groups().count();
    assert_eq!(
        attached,
        file.comments.len(),
        "every comment group is attached exactly once"
    );
}

#[test]
fn same_line_comments_merge_into_one_group() {
    let file = parse_file("/*jjj*/ --kkk\nselect 1 from test;\n");
    assert_eq!(file.comments.len(), 1);
    assert_eq!(file.comments[0].list.len(), 2);
    assert_eq!(file.comments[0].list[0].text, "jjj");
    assert_eq!(file.comments[0].list[1].text, "kkk");
}

#[test]
fn full_line_comment_runs_merge() {
    let file = parse_file("--a\n--b\nselect 1 from test;\n");
    assert_eq!(file.comments.len(), 1);
    assert_eq!(file.comments[0].list.len(), 2);
}

#[test]
fn trailing_comment_does_not_extend_its_group() {
    // `--one` trails code, so `--two` on the next line starts a new
    // group even though only one newline separates them.
    let file = parse_file("select 1 from test; --one\n--two\nselect 2 from test;\n");
    assert_eq!(file.comments.len(), 2);
}

#[test]
fn blank_line_breaks_groups() {
    let file = parse_file("--a\n\n--b\nselect 1 from test;\n");
    assert_eq!(file.comments.len(), 2);
}
