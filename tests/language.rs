use flisp::environment::Environment;
use flisp::types::{Atom, Node, Value};
use flisp::{evaluate, parse, run};

fn id(name: &str) -> Node {
    Node::identifier(name)
}

fn list(elements: Vec<Node>) -> Node {
    Node::wrap_list(elements)
}

fn values(elements: Vec<Value>) -> Value {
    Value::wrap_list(elements)
}

fn strings(elements: &[&str]) -> Value {
    values(elements.iter().map(|&s| Value::from(s)).collect())
}

fn numbers(elements: &[f64]) -> Value {
    values(elements.iter().map(|&x| Value::from(x)).collect())
}

mod parsing {
    use super::*;

    #[test]
    fn single_atom() {
        match parse("a") {
            Node::Atom(Atom::Identifier(name)) => assert_eq!(name.as_str(), "a"),
            other => panic!("expected an identifier, got {}", other),
        }
    }

    #[test]
    fn lists() {
        assert_eq!(parse("()"), list(vec![]));
        assert_eq!(parse("(hi you)"), list(vec![id("hi"), id("you")]));
        assert_eq!(parse("(x (x))"), list(vec![id("x"), list(vec![id("x")])]));
        assert_eq!(
            parse("(x (y) (a b c))"),
            list(vec![
                id("x"),
                list(vec![id("y")]),
                list(vec![id("a"), id("b"), id("c")])
            ])
        );
    }

    #[test]
    fn numbers_are_literals() {
        assert_eq!(
            parse("(1 (a 2))"),
            list(vec![Node::number(1.0), list(vec![id("a"), Node::number(2.0)])])
        );
    }

    #[test]
    fn several_forms_read_as_one_list() {
        assert_eq!(parse("(a) b"), list(vec![list(vec![id("a")]), id("b")]));
        // The gathered list is an ordinary call when its first form is callable
        assert_eq!(run("(lambda (x) (add x 1)) 5").unwrap(), Value::from(6.0));
        assert_eq!(run("1 2").unwrap(), numbers(&[1.0, 2.0]));
    }
}

mod lists {
    use super::*;

    #[test]
    fn empty_list() {
        assert_eq!(run("()").unwrap(), values(vec![]));
    }

    #[test]
    fn list_of_strings() {
        assert_eq!(
            run(r#"("hi" "mary" "rose")"#).unwrap(),
            strings(&["hi", "mary", "rose"])
        );
    }

    #[test]
    fn list_of_numbers() {
        assert_eq!(run("(1 2 3)").unwrap(), numbers(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn numbers_in_strings_stay_strings() {
        assert_eq!(run(r#"("1" "2" "3")"#).unwrap(), strings(&["1", "2", "3"]));
    }
}

mod atoms {
    use super::*;

    #[test]
    fn string_literals_are_returned_verbatim() {
        for s in &["a", "a b", "(a", ")a", "(a)", "", "x ( y ) z"] {
            assert_eq!(run(&format!("\"{}\"", s)).unwrap(), Value::from(*s));
        }
    }

    #[test]
    fn number_atom() {
        assert_eq!(run("123").unwrap(), Value::from(123.0));
    }
}

mod invocation {
    use super::*;

    #[test]
    fn print_returns_its_argument() {
        assert_eq!(run("(print 1)").unwrap(), Value::from(1.0));
    }

    #[test]
    fn head_and_tail() {
        assert_eq!(run("(head (1 2 3))").unwrap(), Value::from(1.0));
        assert_eq!(run("(tail (1 2 3))").unwrap(), numbers(&[2.0, 3.0]));
    }
}

mod lambdas {
    use super::*;

    #[test]
    fn no_parameters() {
        assert_eq!(run("((lambda () (tail (1 2))))").unwrap(), numbers(&[2.0]));
    }

    #[test]
    fn returns_its_argument() {
        assert_eq!(run("((lambda (x) x) 1)").unwrap(), Value::from(1.0));
    }

    #[test]
    fn returns_list_of_arguments() {
        assert_eq!(run("((lambda (x y) (x y)) 1 2)").unwrap(), numbers(&[1.0, 2.0]));
        assert_eq!(
            run("((lambda (x y) (0 x y)) 1 2)").unwrap(),
            numbers(&[0.0, 1.0, 2.0])
        );
    }

    #[test]
    fn calls_builtins_on_arguments() {
        assert_eq!(run("((lambda (x) (head (x))) 1)").unwrap(), Value::from(1.0));
    }
}

mod def {
    use super::*;

    #[test]
    fn evaluates_to_upper_case_name() {
        assert_eq!(run("(def foo (x y) (add x y))").unwrap(), Value::from("FOO"));
    }

    #[test]
    fn defined_and_called() {
        assert_eq!(
            run("((def foo (x y) (add x y)) (foo 4 3))").unwrap(),
            values(vec!["FOO".into(), 7.0.into()])
        );
    }

    #[test]
    fn body_with_let() {
        assert_eq!(
            run("((def foo (x) (let ((y 6)) (add x y))) (foo 4))").unwrap(),
            values(vec!["FOO".into(), 10.0.into()])
        );
    }

    #[test]
    fn called_later_in_module() {
        assert_eq!(
            run("((def foo (x y) (add x y)) (1) (2) (foo 4 3))").unwrap(),
            values(vec![
                "FOO".into(),
                numbers(&[1.0]),
                numbers(&[2.0]),
                7.0.into()
            ])
        );
    }

    #[test]
    fn undefined_function_is_absent() {
        assert_eq!(
            run("((foo 4 3))").unwrap(),
            values(vec![values(vec![Value::Absent, 4.0.into(), 3.0.into()])])
        );
    }

    #[test]
    fn definitions_persist_in_a_shared_environment() {
        let env = Environment::root();
        assert_eq!(
            evaluate(&parse("(def foo (x y) (add x y))"), Some(&env)).unwrap(),
            Value::from("FOO")
        );
        assert_eq!(
            evaluate(&parse("(foo 4 3)"), Some(&env)).unwrap(),
            Value::from(7.0)
        );
    }
}

mod let_form {
    use super::*;

    #[test]
    fn binds_names_in_body() {
        assert_eq!(run("(let ((x 1) (y 2)) (x y))").unwrap(), numbers(&[1.0, 2.0]));
    }

    #[test]
    fn bindings_are_parallel() {
        assert_eq!(
            run("(let ((x 1) (y x)) (x y))").unwrap(),
            values(vec![1.0.into(), Value::Absent])
        );
    }

    #[test]
    fn empty_bindings() {
        assert_eq!(run("(let () 42)").unwrap(), Value::from(42.0));
    }

    #[test]
    fn builtins_are_not_shadowed() {
        let result = run("(let ((head 1)) (head (5 6)))").unwrap();
        assert_eq!(result, Value::from(5.0));
    }
}

mod if_form {
    use super::*;

    #[test]
    fn chooses_the_right_branch() {
        assert_eq!(run("(if 1 42 4711)").unwrap(), Value::from(42.0));
        assert_eq!(run("(if 0 42 4711)").unwrap(), Value::from(4711.0));
    }
}

mod library {
    use super::*;

    #[test]
    fn add() {
        assert_eq!(run("(add 1.3 1.5)").unwrap(), Value::from(2.8));
        assert_eq!(run("(add 3 5)").unwrap(), Value::from(8.0));
    }

    #[test]
    fn compose() {
        let program = r#"(
            let ((x (
                (compose
                    (filter (lambda (x) (gt 5 x)))
                    (map (lambda (x) (add 1 x)))
                    (map (lambda (x) (add 1 x)))
                )
                (1 2 3)
            )) (y 4)) (print x)
        )"#;
        assert_eq!(run(program).unwrap(), numbers(&[3.0, 4.0]));
    }
}

#[test]
fn evaluation_leaves_no_state_behind() {
    let ast = parse("((def sq (x) (multiply x x)) (map sq (1 2 3)) (let ((y 2)) (sq y)))");
    let first = evaluate(&ast, Some(&Environment::root())).unwrap();
    let second = evaluate(&ast, Some(&Environment::root())).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        values(vec!["SQ".into(), numbers(&[1.0, 4.0, 9.0]), 4.0.into()])
    );
    assert_eq!(evaluate(&ast, None).unwrap(), first);
}
