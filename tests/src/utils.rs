use cfront_ast::{
    arena::Arena,
    node::{Category, NodeId, Property},
    nodes::{
        AstNode, BinaryExpression, BinaryOperator, EnumerationSpecifier, Enumerator,
        ExpressionStatement, IdExpression, Name, UnaryExpression, UnaryOperator, WhileStatement,
    },
    visitor::{Process, VisitFlags, Visitor},
};
use rustc_hash::FxHashMap;

/// Installs a fmt subscriber honouring `RUST_LOG`. Safe to call from every test.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn name(arena: &mut Arena, text: &str) -> anyhow::Result<NodeId> {
    Ok(arena.add_node(Name::new(text))?)
}

pub(crate) fn id_expression(arena: &mut Arena, text: &str) -> anyhow::Result<NodeId> {
    let name = name(arena, text)?;
    Ok(arena.add_node(IdExpression::new(Some(name)))?)
}

pub(crate) fn expression_statement(arena: &mut Arena, text: &str) -> anyhow::Result<NodeId> {
    let expression = id_expression(arena, text)?;
    Ok(arena.add_node(ExpressionStatement::new(Some(expression)))?)
}

/// `enum Color { RED, GREEN, BLUE }`
pub(crate) struct ColorEnum {
    pub specifier: NodeId,
    pub name: NodeId,
    pub enumerators: [NodeId; 3],
    pub enumerator_names: [NodeId; 3],
}

pub(crate) fn color_enum(arena: &mut Arena) -> anyhow::Result<ColorEnum> {
    let color = name(arena, "Color")?;
    let specifier = arena.add_node(EnumerationSpecifier::new(Some(color)))?;
    let mut enumerators = [NodeId::default(); 3];
    let mut enumerator_names = [NodeId::default(); 3];
    for (index, text) in ["RED", "GREEN", "BLUE"].into_iter().enumerate() {
        let enumerator_name = name(arena, text)?;
        let enumerator = arena.add_node(Enumerator::new(Some(enumerator_name), None))?;
        arena.append_child(specifier, Property::Enumerator, Some(enumerator))?;
        enumerators[index] = enumerator;
        enumerator_names[index] = enumerator_name;
    }
    Ok(ColorEnum {
        specifier,
        name: color,
        enumerators,
        enumerator_names,
    })
}

/// `while (i < n) i++;`
pub(crate) struct WhileLoop {
    pub statement: NodeId,
    pub condition: NodeId,
    pub body: NodeId,
}

pub(crate) fn while_loop(arena: &mut Arena) -> anyhow::Result<WhileLoop> {
    let i = id_expression(arena, "i")?;
    let n = id_expression(arena, "n")?;
    let condition = arena.add_node(BinaryExpression::new(
        BinaryOperator::LessThan,
        Some(i),
        Some(n),
    ))?;
    let counter = id_expression(arena, "i")?;
    let increment = arena.add_node(UnaryExpression::new(
        UnaryOperator::PostfixIncr,
        Some(counter),
    ))?;
    let body = arena.add_node(ExpressionStatement::new(Some(increment)))?;
    let statement = arena.add_node(WhileStatement::new(Some(condition), Some(body)))?;
    Ok(WhileLoop {
        statement,
        condition,
        body,
    })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Event {
    Visit(NodeId),
    Leave(NodeId),
}

/// Visitor that logs every callback and answers with scripted verdicts.
#[derive(Default)]
pub(crate) struct Recorder {
    pub flags: VisitFlags,
    pub events: Vec<Event>,
    pub on_visit: FxHashMap<NodeId, Process>,
    pub on_leave: FxHashMap<NodeId, Process>,
}

impl Recorder {
    pub(crate) fn new(flags: VisitFlags) -> Self {
        Recorder {
            flags,
            ..Recorder::default()
        }
    }

    pub(crate) fn everything() -> Self {
        Self::new(VisitFlags::all())
    }

    pub(crate) fn only(categories: &[Category]) -> Self {
        Self::new(VisitFlags::only(categories))
    }

    pub(crate) fn visited(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Visit(id) => Some(*id),
                Event::Leave(_) => None,
            })
            .collect()
    }

    pub(crate) fn left(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Leave(id) => Some(*id),
                Event::Visit(_) => None,
            })
            .collect()
    }
}

impl Visitor for Recorder {
    fn flags(&self) -> VisitFlags {
        self.flags
    }

    fn visit(&mut self, _arena: &Arena, node: &AstNode) -> Process {
        self.events.push(Event::Visit(node.id()));
        self.on_visit
            .get(&node.id())
            .copied()
            .unwrap_or(Process::Continue)
    }

    fn leave(&mut self, _arena: &Arena, node: &AstNode) -> Process {
        self.events.push(Event::Leave(node.id()));
        self.on_leave
            .get(&node.id())
            .copied()
            .unwrap_or(Process::Continue)
    }
}
