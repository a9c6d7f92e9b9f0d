use crate::evaluator;
use crate::printer::{self, PrintMode};
use crate::types::{truthy, Arity, PrimitiveFn, TypeMismatch, Value, ValueList};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

fn grab_numbers(args: &[Value]) -> evaluator::Result<Vec<f64>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(Value::as_number).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

fn arithmetic_(args: &[Value], op: fn(f64, f64) -> f64) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Value::Number(op(*x, *y))),
        _ => unreachable!(),
    }
}

// Two strings compare lexicographically; anything else must be a pair of
// numbers. NaN is unordered, so every comparison with it is false.
fn comparison_(args: &[Value], holds: fn(Ordering) -> bool) -> evaluator::Result {
    let ordering = match (&args[0], &args[1]) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (x, y) => x.as_number()?.partial_cmp(&y.as_number()?),
    };
    Ok(Value::from_bool(ordering.map_or(false, holds)))
}

macro_rules! arithmetic_primitive {
    ($NAME:ident, $OP:tt) => {
        paste::item! {
            static [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[Value]| arithmetic_(args, |x, y| x $OP y),
                arity: Arity::exactly(2),
            };
        }
    };
}

arithmetic_primitive!(add, +);
arithmetic_primitive!(subtract, -);
arithmetic_primitive!(multiply, *);
arithmetic_primitive!(divide, /);
arithmetic_primitive!(modulo, %);

// (gt a b) reads as "a > b"
macro_rules! comparison_primitive {
    ($NAME:ident, $METHOD:ident) => {
        paste::item! {
            static [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[Value]| comparison_(args, Ordering::$METHOD),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(gt, is_gt);
comparison_primitive!(gte, is_ge);
comparison_primitive!(lt, is_lt);
comparison_primitive!(lte, is_le);

static INC: PrimitiveFn = PrimitiveFn {
    name: "inc",
    fn_ptr: |args| Ok(Value::Number(args[0].as_number()? + 1.0)),
    arity: Arity::exactly(1),
};

static DEC: PrimitiveFn = PrimitiveFn {
    name: "dec",
    fn_ptr: |args| Ok(Value::Number(args[0].as_number()? - 1.0)),
    arity: Arity::exactly(1),
};

static NEGATE: PrimitiveFn = PrimitiveFn {
    name: "negate",
    fn_ptr: |args| Ok(Value::Number(-args[0].as_number()?)),
    arity: Arity::exactly(1),
};

static SUM: PrimitiveFn = PrimitiveFn {
    name: "sum",
    fn_ptr: sum_,
    arity: Arity::exactly(1),
};

fn sum_(args: &[Value]) -> evaluator::Result {
    let value = grab_numbers(args[0].as_list()?)?.iter().sum();
    Ok(Value::Number(value))
}

static PRODUCT: PrimitiveFn = PrimitiveFn {
    name: "product",
    fn_ptr: product_,
    arity: Arity::exactly(1),
};

fn product_(args: &[Value]) -> evaluator::Result {
    let value = grab_numbers(args[0].as_list()?)?.iter().product();
    Ok(Value::Number(value))
}

static EQUALS: PrimitiveFn = PrimitiveFn {
    name: "equals",
    fn_ptr: |args| Ok(Value::from_bool(args[0] == args[1])),
    arity: Arity::exactly(2),
};

static NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: |args| Ok(Value::from_bool(!truthy(&args[0]))),
    arity: Arity::exactly(1),
};

static IDENTITY: PrimitiveFn = PrimitiveFn {
    name: "identity",
    fn_ptr: |args| Ok(args[0].clone()),
    arity: Arity::exactly(1),
};

// Lists and strings both behave as sequences; strings as sequences of
// single-character strings.
enum Sequence<'a> {
    List(&'a [Value]),
    Chars(Vec<char>),
}

impl<'a> Sequence<'a> {
    fn of(value: &'a Value) -> evaluator::Result<Self> {
        match value {
            Value::List(list) => Ok(Sequence::List(&list[..])),
            Value::String(s) => Ok(Sequence::Chars(s.chars().collect())),
            _ => Err(evaluator::Error::TypeMismatch(TypeMismatch::NotASequence)),
        }
    }

    fn len(&self) -> usize {
        match self {
            Sequence::List(list) => list.len(),
            Sequence::Chars(chars) => chars.len(),
        }
    }

    /// The element at `index`. An empty string stands in for a missing
    /// character, absent for a missing list element.
    fn get(&self, index: Option<usize>) -> Value {
        match self {
            Sequence::List(list) => index
                .and_then(|i| list.get(i))
                .cloned()
                .unwrap_or(Value::Absent),
            Sequence::Chars(chars) => Value::String(
                index
                    .and_then(|i| chars.get(i))
                    .map(char::to_string)
                    .unwrap_or_default(),
            ),
        }
    }

    fn slice(&self, start: usize, end: usize) -> Value {
        let end = end.max(start);
        match self {
            Sequence::List(list) => Value::wrap_list(list[start..end].to_vec()),
            Sequence::Chars(chars) => Value::String(chars[start..end].iter().collect()),
        }
    }
}

static HEAD: PrimitiveFn = PrimitiveFn {
    name: "head",
    fn_ptr: |args| Ok(Sequence::of(&args[0])?.get(Some(0))),
    arity: Arity::exactly(1),
};

static TAIL: PrimitiveFn = PrimitiveFn {
    name: "tail",
    fn_ptr: tail_,
    arity: Arity::exactly(1),
};

fn tail_(args: &[Value]) -> evaluator::Result {
    let seq = Sequence::of(&args[0])?;
    Ok(seq.slice(seq.len().min(1), seq.len()))
}

static LAST: PrimitiveFn = PrimitiveFn {
    name: "last",
    fn_ptr: last_,
    arity: Arity::exactly(1),
};

fn last_(args: &[Value]) -> evaluator::Result {
    let seq = Sequence::of(&args[0])?;
    Ok(seq.get(seq.len().checked_sub(1)))
}

static INIT: PrimitiveFn = PrimitiveFn {
    name: "init",
    fn_ptr: init_,
    arity: Arity::exactly(1),
};

fn init_(args: &[Value]) -> evaluator::Result {
    let seq = Sequence::of(&args[0])?;
    Ok(seq.slice(0, seq.len().saturating_sub(1)))
}

static NTH: PrimitiveFn = PrimitiveFn {
    name: "nth",
    fn_ptr: nth_,
    arity: Arity::exactly(2),
};

// Negative offsets count back from the end.
fn nth_(args: &[Value]) -> evaluator::Result {
    let offset = args[0].as_number()?;
    let seq = Sequence::of(&args[1])?;
    let len = seq.len() as f64;
    let index = if offset < 0.0 { len + offset } else { offset };
    let index = match index >= 0.0 && index < len && index.fract() == 0.0 {
        true => Some(index as usize),
        false => None,
    };
    Ok(seq.get(index))
}

static LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: |args| Ok(Value::Number(Sequence::of(&args[0])?.len() as f64)),
    arity: Arity::exactly(1),
};

static IS_EMPTY: PrimitiveFn = PrimitiveFn {
    name: "isEmpty",
    fn_ptr: is_empty_,
    arity: Arity::exactly(1),
};

fn is_empty_(args: &[Value]) -> evaluator::Result {
    let empty = match Sequence::of(&args[0]) {
        Ok(seq) => seq.len() == 0,
        Err(_) => false,
    };
    Ok(Value::from_bool(empty))
}

static APPEND: PrimitiveFn = PrimitiveFn {
    name: "append",
    fn_ptr: append_,
    arity: Arity::exactly(2),
};

fn append_(args: &[Value]) -> evaluator::Result {
    let mut elements = args[1].as_list()?.to_vec();
    elements.push(args[0].clone());
    Ok(Value::wrap_list(elements))
}

static PREPEND: PrimitiveFn = PrimitiveFn {
    name: "prepend",
    fn_ptr: prepend_,
    arity: Arity::exactly(2),
};

fn prepend_(args: &[Value]) -> evaluator::Result {
    let tail = args[1].as_list()?;
    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(args[0].clone());
    elements.extend_from_slice(tail);
    Ok(Value::wrap_list(elements))
}

static CONCAT: PrimitiveFn = PrimitiveFn {
    name: "concat",
    fn_ptr: concat_,
    arity: Arity::exactly(2),
};

fn concat_(args: &[Value]) -> evaluator::Result {
    match (&args[0], &args[1]) {
        (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{}{}", x, y))),
        (x, y) => {
            let mut elements = x.as_list()?.to_vec();
            elements.extend_from_slice(y.as_list()?);
            Ok(Value::wrap_list(elements))
        }
    }
}

static REVERSE: PrimitiveFn = PrimitiveFn {
    name: "reverse",
    fn_ptr: reverse_,
    arity: Arity::exactly(1),
};

fn reverse_(args: &[Value]) -> evaluator::Result {
    match Sequence::of(&args[0])? {
        Sequence::List(list) => Ok(Value::wrap_list(list.iter().rev().cloned().collect())),
        Sequence::Chars(chars) => Ok(Value::String(chars.iter().rev().collect())),
    }
}

static RANGE: PrimitiveFn = PrimitiveFn {
    name: "range",
    fn_ptr: range_,
    arity: Arity::exactly(2),
};

fn range_(args: &[Value]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [from, to] => {
            // Count steps instead of accumulating: past 2^53 adding one to a
            // float no longer changes it.
            let steps = (to - from).ceil().max(0.0) as u64;
            let elements = (0..steps).map(|i| Value::Number(from + i as f64));
            Ok(Value::wrap_list(elements.collect()))
        }
        _ => unreachable!(),
    }
}

static MAP: PrimitiveFn = PrimitiveFn {
    name: "map",
    fn_ptr: map_,
    arity: Arity::exactly(2),
};

fn map_(args: &[Value]) -> evaluator::Result {
    let func = args[0].as_callable()?;
    let result: Result<Vec<_>, _> = args[1]
        .as_list()?
        .chunks_exact(1)
        .map(|element| evaluator::apply(func, element))
        .collect();
    Ok(Value::wrap_list(result?))
}

fn select(args: &[Value], keep: bool) -> evaluator::Result {
    let predicate = args[0].as_callable()?;
    let mut selected = Vec::new();
    for element in args[1].as_list()?.chunks_exact(1) {
        if truthy(&evaluator::apply(predicate, element)?) == keep {
            selected.push(element[0].clone());
        }
    }
    Ok(Value::wrap_list(selected))
}

static FILTER: PrimitiveFn = PrimitiveFn {
    name: "filter",
    fn_ptr: |args| select(args, true),
    arity: Arity::exactly(2),
};

static REJECT: PrimitiveFn = PrimitiveFn {
    name: "reject",
    fn_ptr: |args| select(args, false),
    arity: Arity::exactly(2),
};

static REDUCE: PrimitiveFn = PrimitiveFn {
    name: "reduce",
    fn_ptr: reduce_,
    arity: Arity::exactly(3),
};

fn reduce_(args: &[Value]) -> evaluator::Result {
    let func = args[0].as_callable()?;
    let mut acc = args[1].clone();
    for element in args[2].as_list()? {
        acc = evaluator::apply(func, &[acc, element.clone()])?;
    }
    Ok(acc)
}

fn composition(funcs: impl Iterator<Item = Value>) -> evaluator::Result {
    let funcs: Result<Vec<_>, _> = funcs
        .map(|func| func.as_callable().map(Value::clone))
        .collect();
    Ok(Value::Composition(Rc::new(ValueList(funcs?))))
}

// Right to left: the last function is applied first.
static COMPOSE: PrimitiveFn = PrimitiveFn {
    name: "compose",
    fn_ptr: |args| composition(args.iter().rev().cloned()),
    arity: Arity::at_least(1),
};

static PIPE: PrimitiveFn = PrimitiveFn {
    name: "pipe",
    fn_ptr: |args| composition(args.iter().cloned()),
    arity: Arity::at_least(1),
};

static APPLY: PrimitiveFn = PrimitiveFn {
    name: "apply",
    fn_ptr: |args| evaluator::apply(args[0].as_callable()?, args[1].as_list()?),
    arity: Arity::exactly(2),
};

static PRINT: PrimitiveFn = PrimitiveFn {
    name: "print",
    fn_ptr: print_,
    arity: Arity::exactly(1),
};

fn print_(args: &[Value]) -> evaluator::Result {
    let text = printer::pr_str(&args[0], PrintMode::Directly);
    writeln!(std::io::stdout(), "{}", text)?;
    Ok(args[0].clone())
}

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in vec![
            // Arithmetic
            &ADD,
            &SUBTRACT,
            &MULTIPLY,
            &DIVIDE,
            &MODULO,
            &INC,
            &DEC,
            &NEGATE,
            &SUM,
            &PRODUCT,
            // Comparisons and logic
            &EQUALS,
            &GT,
            &GTE,
            &LT,
            &LTE,
            &NOT,
            // Working with lists and strings
            &HEAD,
            &TAIL,
            &LAST,
            &INIT,
            &NTH,
            &LENGTH,
            &IS_EMPTY,
            &APPEND,
            &PREPEND,
            &CONCAT,
            &REVERSE,
            &RANGE,
            // Working with functions
            &MAP,
            &FILTER,
            &REJECT,
            &REDUCE,
            &COMPOSE,
            &PIPE,
            &APPLY,
            &IDENTITY,
            // Other
            &PRINT,
        ] {
            map.insert(func.name, func);
        }
        map
    };
}
