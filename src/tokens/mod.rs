//! Typed grammars for the tokens shared by the text formats, and the line
//! classifier the streaming parsers dispatch on.
//!
//! Each grammar is a [`Token`]: a compiled [`Rule`] plus the conversions
//! between its [`Value`] and a domain type. They are built once, on first
//! use, and shared immutably.

use crate::error::{Grammar as GrammarError, GrammarResult};
use crate::geom::{CachedTriangle, Plane, Point};
use crate::grammar::{
    AtomKind, Composite, Entry, Grammar, Record, Rule, Value,
};
use crate::map::{BrushSide, ProjectionAxis, TextureVector};
use once_cell::sync::Lazy;
use std::string::{String, ToString};

pub struct Token<T> {
    rule: Rule,
    build: fn(&Value) -> GrammarResult<T>,
    render: fn(&T) -> GrammarResult<Value>,
}

impl<T> Token<T> {
    pub fn new(
        rule: impl Into<Rule>,
        build: fn(&Value) -> GrammarResult<T>,
        render: fn(&T) -> GrammarResult<Value>,
    ) -> Token<T> {
        Token {
            rule: rule.into(),
            build,
            render,
        }
    }

    /// The untyped rule, for embedding in larger composites
    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl<T> Grammar for Token<T> {
    type Value = T;

    fn pattern(&self) -> &str {
        self.rule.pattern()
    }

    fn describes(&self, text: &str) -> bool {
        self.rule.describes(text)
    }

    fn parse(&self, text: &str) -> GrammarResult<T> {
        (self.build)(&self.rule.parse(text)?)
    }

    fn unparse(&self, value: &T) -> GrammarResult<String> {
        self.rule.unparse(&(self.render)(value)?)
    }
}

pub static FLOAT: Lazy<Token<f64>> =
    Lazy::new(|| Token::new(AtomKind::Float, build_float, render_float));

pub static COMMENT: Lazy<Token<String>> =
    Lazy::new(|| Token::new(AtomKind::Comment, build_text, render_text));

pub static NODE_TYPE: Lazy<Token<String>> =
    Lazy::new(|| Token::new(AtomKind::Identifier, build_text, render_text));

pub static KEY_VALUE: Lazy<Token<(String, String)>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::field("key", AtomKind::Quoted),
        Entry::field("value", AtomKind::Quoted),
    ]);
    Token::new(rule, build_key_value, render_key_value)
});

/// `(x y z)`
pub static POINT: Lazy<Token<Point>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::open("("),
        Entry::field("x", AtomKind::Float),
        Entry::field("y", AtomKind::Float),
        Entry::field("z", AtomKind::Float),
        Entry::close(")"),
    ]);
    Token::new(rule, build_point, render_point)
});

/// Three points; parsing keeps the source text so it can be written back
/// unchanged
pub static PLANE: Lazy<Token<Plane>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::field("A", POINT.rule().clone()),
        Entry::field("B", POINT.rule().clone()),
        Entry::field("C", POINT.rule().clone()),
    ]);
    Token::new(rule, build_plane, render_plane)
});

/// `[x y z offset] scale`
pub static PROJECTION_AXIS: Lazy<Token<ProjectionAxis>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::open("["),
        Entry::field("x", AtomKind::Float),
        Entry::field("y", AtomKind::Float),
        Entry::field("z", AtomKind::Float),
        Entry::field("offset", AtomKind::Float),
        Entry::close("]"),
        Entry::field("scale", AtomKind::Float),
    ]);
    Token::new(rule, build_projection_axis, render_projection_axis)
});

/// `plane shader s_offset t_offset rotation s_scale t_scale`
pub static QUAKE_SIDE: Lazy<Token<BrushSide>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::field("plane", PLANE.rule().clone()),
        Entry::field("shader", AtomKind::Text),
        Entry::field("s_offset", AtomKind::Float),
        Entry::field("t_offset", AtomKind::Float),
        Entry::field("rotation", AtomKind::Float),
        Entry::field("s_scale", AtomKind::Float),
        Entry::field("t_scale", AtomKind::Float),
    ]);
    Token::new(rule, build_quake_side, render_quake_side)
});

/// `plane shader [sx sy sz s_offset] [tx ty tz t_offset] rotation s_scale
/// t_scale`
pub static VALVE_SIDE: Lazy<Token<BrushSide>> = Lazy::new(|| {
    let rule = Composite::new(vec![
        Entry::field("plane", PLANE.rule().clone()),
        Entry::field("shader", AtomKind::Text),
        Entry::field("s", valve_axis()),
        Entry::field("t", valve_axis()),
        Entry::field("rotation", AtomKind::Float),
        Entry::field("s_scale", AtomKind::Float),
        Entry::field("t_scale", AtomKind::Float),
    ]);
    Token::new(rule, build_valve_side, render_valve_side)
});

fn valve_axis() -> Composite {
    Composite::new(vec![
        Entry::open("["),
        Entry::field("x", AtomKind::Float),
        Entry::field("y", AtomKind::Float),
        Entry::field("z", AtomKind::Float),
        Entry::field("offset", AtomKind::Float),
        Entry::close("]"),
    ])
}

fn value_kind(expected: &str, found: &Value) -> GrammarError {
    GrammarError::ValueKind {
        pattern: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

fn record(value: &Value) -> GrammarResult<&Record> {
    value.as_record().ok_or_else(|| value_kind("a record", value))
}

fn build_float(value: &Value) -> GrammarResult<f64> {
    value.as_float().ok_or_else(|| value_kind("a number", value))
}

fn render_float(number: &f64) -> GrammarResult<Value> {
    Ok(Value::Float(*number))
}

fn build_text(value: &Value) -> GrammarResult<String> {
    value
        .as_text()
        .map(ToString::to_string)
        .ok_or_else(|| value_kind("text", value))
}

fn render_text(text: &String) -> GrammarResult<Value> {
    Ok(Value::Text(text.clone()))
}

fn build_key_value(value: &Value) -> GrammarResult<(String, String)> {
    let record = record(value)?;
    Ok((
        record.text("key")?.to_string(),
        record.text("value")?.to_string(),
    ))
}

fn render_key_value(pair: &(String, String)) -> GrammarResult<Value> {
    Ok(Value::Record(
        Record::new()
            .with("key", Value::Text(pair.0.clone()))
            .with("value", Value::Text(pair.1.clone())),
    ))
}

fn point_from_record(record: &Record) -> GrammarResult<Point> {
    Ok(Point::new(
        record.float("x")?,
        record.float("y")?,
        record.float("z")?,
    ))
}

fn point_record(point: &Point) -> Record {
    Record::new()
        .with("x", Value::Float(point.x))
        .with("y", Value::Float(point.y))
        .with("z", Value::Float(point.z))
}

fn build_point(value: &Value) -> GrammarResult<Point> {
    point_from_record(record(value)?)
}

fn render_point(point: &Point) -> GrammarResult<Value> {
    Ok(Value::Record(point_record(point)))
}

fn build_plane(value: &Value) -> GrammarResult<Plane> {
    let record = record(value)?;
    let points = [
        point_from_record(record.record("A")?)?,
        point_from_record(record.record("B")?)?,
        point_from_record(record.record("C")?)?,
    ];
    let [a, b, c] = points;

    Ok(Plane::from_triangle(a, b, c)?
        .with_cached_triangle(CachedTriangle::new(points, record.source())))
}

fn render_plane(plane: &Plane) -> GrammarResult<Value> {
    if let Some(cached) = plane.cached_triangle() {
        return Ok(Value::Verbatim(cached.text().to_string()));
    }

    let [a, b, c] = plane.as_triangle();

    Ok(Value::Record(
        Record::new()
            .with("A", Value::Record(point_record(&a)))
            .with("B", Value::Record(point_record(&b)))
            .with("C", Value::Record(point_record(&c))),
    ))
}

fn axis_from_record(
    record: &Record,
    scale: f64,
) -> GrammarResult<ProjectionAxis> {
    Ok(ProjectionAxis {
        axis: point_from_record(record)?,
        offset: record.float("offset")?,
        scale,
    })
}

fn axis_record(axis: &ProjectionAxis) -> Record {
    point_record(&axis.axis)
        .with("offset", Value::Float(axis.offset))
        .with("scale", Value::Float(axis.scale))
}

fn build_projection_axis(value: &Value) -> GrammarResult<ProjectionAxis> {
    let record = record(value)?;
    axis_from_record(record, record.float("scale")?)
}

fn render_projection_axis(axis: &ProjectionAxis) -> GrammarResult<Value> {
    Ok(Value::Record(axis_record(axis)))
}

fn build_quake_side(value: &Value) -> GrammarResult<BrushSide> {
    let record = record(value)?;
    let mut side = BrushSide::new(build_plane(record.field("plane")?)?);

    side.shader = record.text("shader")?.to_string();
    side.texture_vector.s.offset = record.float("s_offset")?;
    side.texture_vector.t.offset = record.float("t_offset")?;
    side.texture_vector.s.scale = record.float("s_scale")?;
    side.texture_vector.t.scale = record.float("t_scale")?;
    side.set_rotation(record.float("rotation")?);

    Ok(side)
}

fn render_quake_side(side: &BrushSide) -> GrammarResult<Value> {
    let TextureVector { s, t, rotation } = &side.texture_vector;

    Ok(Value::Record(
        Record::new()
            .with("plane", render_plane(&side.plane)?)
            .with("shader", Value::Text(side.shader.clone()))
            .with("s_offset", Value::Float(s.offset))
            .with("t_offset", Value::Float(t.offset))
            .with("rotation", Value::Float(*rotation))
            .with("s_scale", Value::Float(s.scale))
            .with("t_scale", Value::Float(t.scale)),
    ))
}

fn build_valve_side(value: &Value) -> GrammarResult<BrushSide> {
    let record = record(value)?;
    let s = axis_from_record(record.record("s")?, record.float("s_scale")?)?;
    let t = axis_from_record(record.record("t")?, record.float("t_scale")?)?;

    Ok(BrushSide {
        plane: build_plane(record.field("plane")?)?,
        shader: record.text("shader")?.to_string(),
        texture_vector: TextureVector {
            s,
            t,
            rotation: record.float("rotation")?,
        },
    })
}

fn render_valve_side(side: &BrushSide) -> GrammarResult<Value> {
    let TextureVector { s, t, rotation } = &side.texture_vector;

    Ok(Value::Record(
        Record::new()
            .with("plane", render_plane(&side.plane)?)
            .with("shader", Value::Text(side.shader.clone()))
            .with("s", Value::Record(axis_record(s)))
            .with("t", Value::Record(axis_record(t)))
            .with("rotation", Value::Float(*rotation))
            .with("s_scale", Value::Float(s.scale))
            .with("t_scale", Value::Float(t.scale)),
    ))
}

/// The kinds of line the text formats are made of
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Open,
    Close,
    NodeType,
    KeyValue,
    QuakeSide,
    ValveSide,
}

impl LineKind {
    pub fn describes(self, text: &str) -> bool {
        match self {
            LineKind::Comment => COMMENT.describes(text),
            LineKind::Open => text == "{",
            LineKind::Close => text == "}",
            LineKind::NodeType => NODE_TYPE.describes(text),
            LineKind::KeyValue => KEY_VALUE.describes(text),
            LineKind::QuakeSide => QUAKE_SIDE.describes(text),
            LineKind::ValveSide => VALVE_SIDE.describes(text),
        }
    }
}

/// Line priority for id-Software map files
pub const MAP_LINES: [LineKind; 6] = [
    LineKind::Comment,
    LineKind::Open,
    LineKind::Close,
    LineKind::KeyValue,
    LineKind::QuakeSide,
    LineKind::ValveSide,
];

/// Line priority for brace-nested node files
pub const NODE_LINES: [LineKind; 4] = [
    LineKind::NodeType,
    LineKind::Open,
    LineKind::Close,
    LineKind::KeyValue,
];

/// The first kind in `priority` that describes `text`
pub fn classify(text: &str, priority: &[LineKind]) -> Option<LineKind> {
    priority.iter().copied().find(|kind| kind.describes(text))
}
