use crate::utils::{
    color_enum, expression_statement, id_expression, init_tracing, name, while_loop,
};
use cfront_ast::{
    arena::Arena,
    config::{ArenaConfig, ReattachPolicy},
    errors::AstError,
    node::{Category, Location, NodeId, Property, Shape},
    nodes::{
        AstNode, CompoundStatement, Declarator, EnumerationSpecifier, IdExpression, Name,
        NodeKind, NullStatement, SimpleDeclSpecifier, SimpleDeclaration, SimpleType, WhileStatement,
    },
};

#[test]
fn test_add_node_assigns_sequential_ids() -> anyhow::Result<()> {
    init_tracing();
    let mut arena = Arena::new();
    assert!(arena.is_empty());
    let first = name(&mut arena, "a")?;
    let second = name(&mut arena, "b")?;
    assert_eq!(first, NodeId::from_raw(1));
    assert_eq!(second, NodeId::from_raw(2));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.kind(first), Some(NodeKind::Name));
    assert_eq!(arena.get(second).map(AstNode::id), Some(second));
    Ok(())
}

#[test]
fn test_constructor_children_are_linked() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    assert_eq!(arena.parent(lp.condition), Some(lp.statement));
    assert_eq!(arena.property(lp.condition), Some(Property::ConditionExpression));
    assert_eq!(arena.parent(lp.body), Some(lp.statement));
    assert_eq!(arena.property(lp.body), Some(Property::Body));
    assert_eq!(arena.parent(lp.statement), None);
    assert_eq!(arena.property(lp.statement), None);
    Ok(())
}

#[test]
fn test_set_child_attaches() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let statement = arena.add_node(WhileStatement::new(None, None))?;
    let condition = id_expression(&mut arena, "c")?;

    let displaced = arena.set_child(statement, Property::ConditionExpression, Some(condition))?;

    assert_eq!(displaced, None);
    assert_eq!(arena.parent(condition), Some(statement));
    assert_eq!(arena.property(condition), Some(Property::ConditionExpression));
    let node = arena
        .get_as::<WhileStatement>(statement)
        .expect("while statement");
    assert_eq!(node.condition(), Some(condition));
    assert_eq!(node.body(), None);
    Ok(())
}

#[test]
fn test_set_child_overwrite_detaches_previous_occupant() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let other = id_expression(&mut arena, "running")?;

    let displaced = arena.set_child(lp.statement, Property::ConditionExpression, Some(other))?;

    assert_eq!(displaced, Some(lp.condition));
    assert_eq!(arena.parent(lp.condition), None);
    assert_eq!(arena.property(lp.condition), None);
    assert!(arena.contains(lp.condition));
    assert_eq!(arena.parent(other), Some(lp.statement));
    Ok(())
}

#[test]
fn test_set_child_none_clears_slot() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;

    let displaced = arena.set_child(lp.statement, Property::Body, None)?;

    assert_eq!(displaced, Some(lp.body));
    assert_eq!(arena.parent(lp.body), None);
    assert_eq!(arena.children(lp.statement), vec![lp.condition]);
    Ok(())
}

#[test]
fn test_set_child_same_occupant_is_noop() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let displaced = arena.set_child(lp.statement, Property::Body, Some(lp.body))?;
    assert_eq!(displaced, None);
    assert_eq!(arena.parent(lp.body), Some(lp.statement));
    Ok(())
}

#[test]
fn test_append_preserves_order() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let color = color_enum(&mut arena)?;
    let specifier = arena
        .get_as::<EnumerationSpecifier>(color.specifier)
        .expect("enumeration specifier");
    assert_eq!(specifier.enumerators(), &color.enumerators);
    for enumerator in color.enumerators {
        assert_eq!(arena.parent(enumerator), Some(color.specifier));
        assert_eq!(arena.property(enumerator), Some(Property::Enumerator));
    }
    Ok(())
}

#[test]
fn test_append_none_is_noop() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let block = arena.add_node(CompoundStatement::new(vec![]))?;
    arena.append_child(block, Property::NestedStatement, None)?;
    assert!(arena.children(block).is_empty());
    Ok(())
}

#[test]
fn test_shape_mismatch() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let block = arena.add_node(CompoundStatement::new(vec![]))?;
    let statement = arena.add_node(NullStatement::new())?;
    let err = arena
        .set_child(block, Property::NestedStatement, Some(statement))
        .unwrap_err();
    assert_eq!(
        err,
        AstError::ShapeMismatch {
            kind: NodeKind::CompoundStatement,
            property: Property::NestedStatement,
            shape: Shape::List,
        }
    );

    let lp = while_loop(&mut arena)?;
    let err = arena
        .append_child(lp.statement, Property::Body, Some(statement))
        .unwrap_err();
    assert!(matches!(err, AstError::ShapeMismatch { shape: Shape::Single, .. }));
    assert_eq!(arena.parent(statement), None);
    Ok(())
}

#[test]
fn test_no_such_slot() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let leaf = name(&mut arena, "x")?;
    let other = name(&mut arena, "y")?;
    let err = arena.set_child(leaf, Property::Body, Some(other)).unwrap_err();
    assert_eq!(
        err,
        AstError::NoSuchSlot {
            kind: NodeKind::Name,
            property: Property::Body,
        }
    );
    Ok(())
}

#[test]
fn test_kind_mismatch_is_rejected_without_mutation() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let expression = id_expression(&mut arena, "x")?;

    let err = arena
        .set_child(lp.statement, Property::Body, Some(expression))
        .unwrap_err();

    assert_eq!(
        err,
        AstError::KindMismatch {
            id: expression,
            property: Property::Body,
            expected: Category::Statements,
            found: Category::Expressions,
        }
    );
    assert_eq!(arena.parent(lp.body), Some(lp.statement));
    assert_eq!(arena.parent(expression), None);
    Ok(())
}

#[test]
fn test_constructor_rejects_wrong_category() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let statement = arena.add_node(NullStatement::new())?;
    let err = arena
        .add_node(IdExpression::new(Some(statement)))
        .unwrap_err();
    assert!(matches!(
        err,
        AstError::KindMismatch {
            expected: Category::Names,
            found: Category::Statements,
            ..
        }
    ));
    assert_eq!(arena.len(), 1);
    Ok(())
}

#[test]
fn test_constructor_rejects_unknown_and_duplicate_children() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let missing = NodeId::from_raw(42);
    let err = arena
        .add_node(CompoundStatement::new(vec![missing]))
        .unwrap_err();
    assert_eq!(err, AstError::UnknownNode { id: missing });

    let statement = arena.add_node(NullStatement::new())?;
    let err = arena
        .add_node(CompoundStatement::new(vec![statement, statement]))
        .unwrap_err();
    assert_eq!(err, AstError::DuplicateChild { id: statement });
    assert_eq!(arena.parent(statement), None);
    Ok(())
}

#[test]
fn test_reattach_is_rejected_by_default() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let block = arena.add_node(CompoundStatement::new(vec![]))?;

    let err = arena
        .append_child(block, Property::NestedStatement, Some(lp.body))
        .unwrap_err();

    assert_eq!(
        err,
        AstError::AlreadyAttached {
            id: lp.body,
            parent: lp.statement,
        }
    );
    assert_eq!(arena.parent(lp.body), Some(lp.statement));
    assert!(arena.children(block).is_empty());

    let err = arena
        .add_node(CompoundStatement::new(vec![lp.body]))
        .unwrap_err();
    assert!(matches!(err, AstError::AlreadyAttached { .. }));
    Ok(())
}

#[test]
fn test_reattach_with_detach_policy_moves_node() -> anyhow::Result<()> {
    let mut arena =
        Arena::with_config(ArenaConfig::default().with_reattach(ReattachPolicy::Detach));
    let lp = while_loop(&mut arena)?;
    let block = arena.add_node(CompoundStatement::new(vec![]))?;

    arena.append_child(block, Property::NestedStatement, Some(lp.body))?;

    assert_eq!(arena.parent(lp.body), Some(block));
    assert_eq!(arena.property(lp.body), Some(Property::NestedStatement));
    let statement = arena
        .get_as::<WhileStatement>(lp.statement)
        .expect("while statement");
    assert_eq!(statement.body(), None);

    let moved = arena.add_node(CompoundStatement::new(vec![lp.body]))?;
    assert_eq!(arena.parent(lp.body), Some(moved));
    assert!(arena.children(block).is_empty());
    Ok(())
}

#[test]
fn test_cycles_are_rejected() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let inner = arena.add_node(CompoundStatement::new(vec![]))?;
    let outer = arena.add_node(CompoundStatement::new(vec![inner]))?;

    let err = arena
        .append_child(inner, Property::NestedStatement, Some(outer))
        .unwrap_err();
    assert_eq!(
        err,
        AstError::Cycle {
            parent: inner,
            child: outer,
        }
    );

    let err = arena
        .append_child(outer, Property::NestedStatement, Some(outer))
        .unwrap_err();
    assert!(matches!(err, AstError::Cycle { .. }));
    assert_eq!(arena.children(outer), vec![inner]);
    Ok(())
}

#[test]
fn test_detach() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let first = expression_statement(&mut arena, "a")?;
    let second = expression_statement(&mut arena, "b")?;
    let third = expression_statement(&mut arena, "c")?;
    let block = arena.add_node(CompoundStatement::new(vec![first, second, third]))?;

    assert_eq!(arena.detach(second)?, Some(block));
    assert_eq!(arena.children(block), vec![first, third]);
    assert_eq!(arena.parent(second), None);
    assert_eq!(arena.detach(second)?, None);

    let missing = NodeId::from_raw(999);
    assert_eq!(
        arena.detach(missing).unwrap_err(),
        AstError::UnknownNode { id: missing }
    );
    Ok(())
}

#[test]
fn test_ancestors_and_roots() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let block = arena.add_node(CompoundStatement::new(vec![lp.statement]))?;
    let stray = name(&mut arena, "stray")?;

    let leaf = arena.children(lp.condition)[0];
    let chain: Vec<NodeId> = arena.ancestors(leaf).collect();
    assert_eq!(chain, vec![lp.condition, lp.statement, block]);
    assert_eq!(arena.ancestors(block).count(), 0);
    assert_eq!(arena.roots(), vec![block, stray]);
    Ok(())
}

#[test]
fn test_remove_subtree() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let lp = while_loop(&mut arena)?;
    let total = arena.len();

    // i++; is the statement, the unary, the id-expression and the name
    let removed = arena.remove_subtree(lp.body)?;

    assert_eq!(removed, 4);
    assert_eq!(arena.len(), total - 4);
    assert!(!arena.contains(lp.body));
    assert_eq!(arena.children(lp.statement), vec![lp.condition]);
    Ok(())
}

#[test]
fn test_declaration_with_typed_getters() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let specifier = arena.add_node(SimpleDeclSpecifier::new(SimpleType::Int))?;
    let x = name(&mut arena, "x")?;
    let declarator = arena.add_node(Declarator::new(Some(x), None))?;
    let declaration = arena.add_node(SimpleDeclaration::new(Some(specifier), vec![declarator]))?;

    let node = arena
        .get_as::<SimpleDeclaration>(declaration)
        .expect("simple declaration");
    assert_eq!(node.decl_specifier(), Some(specifier));
    assert_eq!(node.declarators(), &[declarator]);
    assert!(arena.get_as::<WhileStatement>(declaration).is_none());
    assert_eq!(arena.children(declaration), vec![specifier, declarator]);
    Ok(())
}

#[test]
fn test_node_serializes_to_json() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let id = arena.add_node(Name::new("RED").with_location(Location::from_source("RED")))?;
    let json = serde_json::to_value(arena.get(id))?;
    assert_eq!(json["Name"]["text"], "RED");
    assert_eq!(json["Name"]["id"], 1);
    assert_eq!(json["Name"]["location"]["source"], "RED");
    Ok(())
}

#[test]
fn test_arena_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Arena>();
}
