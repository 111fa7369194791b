use std::cmp::Ordering;

use numtower::tower::{float_registry, rational_registry};
use numtower::{Arithmetic, BigInt, Kind, Matrix, NumError, Number, Op, Registry, Tower, Vector};

fn n(v: i64) -> Number {
    Number::from(v)
}

fn ints(rows: &[&[i64]]) -> Matrix<Number> {
    Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| n(x)))).unwrap()
}

// ── Scalars ─────────────────────────────────────────────────────────

#[test]
fn integer_scenarios() {
    let z = Tower::integers();
    assert_eq!(z.times(&n(123), &n(1001)).unwrap(), n(123123));
    assert_eq!(z.idiv(&n(111111111), &n(12345679)).unwrap(), n(9));
    assert_eq!(z.modulo(&n(-7), &n(2)).unwrap(), n(-1));
    assert_eq!(z.idiv(&n(-7), &n(2)).unwrap(), n(-3));
    assert_eq!(z.idiv(&n(1), &n(0)), Err(NumError::DivisionByZero));
}

#[test]
fn products_promote_and_quotients_demote() {
    let z = Tower::integers();
    let a = z.parse("99999999999999").unwrap();
    let sq = z.times(&a, &a).unwrap();
    assert_eq!(sq.kind(), Kind::BigInt);
    assert_eq!(sq.to_string(), "9999999999999800000000000001");
    let back = z.idiv(&sq, &a).unwrap();
    assert_eq!(back.kind(), Kind::Int);
    assert_eq!(back, a);
}

#[test]
fn rational_scenarios() {
    let q = Tower::rationals();
    let sum = q.plus(&q.parse("2/3").unwrap(), &q.parse("1/2").unwrap()).unwrap();
    assert_eq!(sum.to_string(), "7/6");
    assert_eq!(sum.kind(), Kind::Fraction);

    assert_eq!(q.parse("-6/4").unwrap().to_string(), "-3/2");
    assert_eq!(q.parse("6/-3").unwrap(), n(-2));
    assert_eq!(q.inverse(&n(-4)).unwrap().to_string(), "-1/4");
    assert_eq!(q.inverse(&n(0)), Err(NumError::DivisionByZero));

    // Fraction plus a big integer meets at Fraction.
    let big = q.parse("123456789012345678901234567890").unwrap();
    let half = q.parse("1/2").unwrap();
    assert_eq!(
        q.plus(&big, &half).unwrap().to_string(),
        "246913578024691357802469135781/2"
    );
    assert_eq!(q.cmp(&half, &big).unwrap(), Ordering::Less);
}

#[test]
fn floats_absorb_exact_operands() {
    let f = Tower::floats();
    let x = f.plus(&n(1), &Number::Float(0.5)).unwrap();
    assert_eq!(x, Number::Float(1.5));
    let q = f.parse("1/4").unwrap();
    assert_eq!(f.times(&q, &Number::Float(2.0)).unwrap(), Number::Float(0.5));
    assert_eq!(f.to_native(&q).unwrap(), 0.25);
}

#[test]
fn unsupported_operations_name_operand_kinds() {
    let z = Tower::integers();
    assert_eq!(
        z.div(&n(1), &n(2)),
        Err(NumError::UnsupportedOperation {
            op: "div",
            operands: vec!["MachineInt", "MachineInt"],
        })
    );
    assert!(matches!(
        z.plus(&n(1), &Number::Float(1.0)),
        Err(NumError::UnsupportedOperation { op: "plus", .. })
    ));
}

#[test]
fn call_by_name() {
    let q = Tower::rationals();
    for (name, a, b, expected) in [
        ("plus", "1/3", "1/6", "1/2"),
        ("minus", "1", "1/3", "2/3"),
        ("times", "2/3", "3", "2"),
        ("div", "1", "7", "1/7"),
        ("idiv", "7/2", "1", "3"),
        ("mod", "7/2", "1", "1/2"),
    ] {
        let op: Op = name.parse().unwrap();
        assert_eq!(op.to_string(), name);
        let r = q.call(op, &[&q.parse(a).unwrap(), &q.parse(b).unwrap()]).unwrap();
        assert_eq!(r.to_string(), expected, "{name}({a}, {b})");
    }
    assert!("pow".parse::<Op>().is_err());
}

// ── Registration ────────────────────────────────────────────────────

#[test]
fn registering_twice_gives_the_same_dispatch() {
    let once = Tower::floats();
    let twice = Tower::new(float_registry().merge(float_registry()));
    assert_eq!(once.registry().method_count(), twice.registry().method_count());
    assert_eq!(once.registry().upcast_edges(), twice.registry().upcast_edges());

    let kinds = [Kind::Int, Kind::BigInt, Kind::Fraction, Kind::Float];
    for &a in &kinds {
        for &b in &kinds {
            assert_eq!(once.coercion_path(a, b), twice.coercion_path(a, b));
        }
        for op in Op::ALL {
            assert_eq!(once.operation_path(a, op), twice.operation_path(a, op));
        }
    }

    let x = once.parse("22/7").unwrap();
    let y = Number::Float(0.125);
    assert_eq!(once.times(&x, &y), twice.times(&x, &y));
}

#[test]
fn downcast_is_a_fixed_point() {
    let q = Tower::rationals();
    let values = [
        Number::Big(BigInt::from(5)),
        Number::Big(BigInt::from(10).pow(20)),
        q.parse("4/2").unwrap(),
        q.parse("-3/9").unwrap(),
        n(0),
    ];
    for v in values {
        let once = q.downcast(v).unwrap();
        let again = q.downcast(once.clone()).unwrap();
        assert_eq!(once, again);
    }
    assert_eq!(q.downcast(Number::Big(BigInt::from(5))).unwrap().kind(), Kind::Int);
}

#[test]
fn extensions_override_existing_methods() {
    let z = Tower::integers().extend(Registry::new().unary(Op::Abs, Kind::Int, |_, _| Ok(Number::from(42))));
    assert_eq!(z.abs(&n(-1)).unwrap(), n(42));
    assert_eq!(z.plus(&n(1), &n(1)).unwrap(), n(2));

    let with_floats = Tower::integers().extend(rational_registry()).extend(float_registry());
    assert!(with_floats.supports(Kind::Float));
    assert_eq!(with_floats.div(&n(1), &n(4)).unwrap().to_string(), "1/4");
}

#[test]
fn tower_arithmetic_gcd() {
    let z = Tower::integers();
    assert_eq!(z.gcd(&n(84), &n(-36)).unwrap(), n(12));
    let b = z.gcdex(&n(240), &n(46)).unwrap();
    let combo = z
        .plus(&z.times(&b.r, &n(240)).unwrap(), &z.times(&b.s, &n(46)).unwrap())
        .unwrap();
    assert_eq!(combo, b.gcd);
}

// ── Vectors and matrices ────────────────────────────────────────────

#[test]
fn matrix_tower_products() {
    let m = Tower::matrices();
    let a: Number = ints(&[&[1, 2], &[3, 4]]).into();
    let id: Number = ints(&[&[1, 0], &[0, 1]]).into();
    assert_eq!(m.times(&a, &id).unwrap(), a);

    let v: Number = Vector::from_vec(vec![n(1), n(-1)]).unwrap().into();
    assert_eq!(m.times(&a, &v).unwrap().to_string(), "[ -1, -1 ]");
    assert_eq!(m.times(&v, &a).unwrap().to_string(), "[ -2, -2 ]");
    assert_eq!(m.times(&v, &v).unwrap(), n(2));

    let half = m.parse("1/2").unwrap();
    assert_eq!(m.times(&half, &a).unwrap().to_string(), "[ [ 1/2, 1 ], [ 3/2, 2 ] ]");
    assert_eq!(m.times(&a, &half).unwrap(), m.times(&half, &a).unwrap());
    assert_eq!(m.div(&a, &n(2)).unwrap(), m.times(&half, &a).unwrap());
    assert_eq!(m.idiv(&a, &n(2)).unwrap().to_string(), "[ [ 0, 1 ], [ 1, 2 ] ]");
}

#[test]
fn matrix_tower_order_and_shapes() {
    let m = Tower::matrices();
    let a: Number = ints(&[&[1, 2], &[3, 4]]).into();
    let b: Number = ints(&[&[1, 2], &[3, 5]]).into();
    assert_eq!(m.cmp(&a, &b).unwrap(), Ordering::Less);
    assert_eq!(m.minus(&b, &a).unwrap().to_string(), "[ [ 0, 0 ], [ 0, 1 ] ]");
    assert_eq!(m.negative(&a).unwrap().to_string(), "[ [ -1, -2 ], [ -3, -4 ] ]");

    let v: Number = Vector::from_vec(vec![n(0), n(-3), n(1)]).unwrap().into();
    assert_eq!(m.sgn(&v).unwrap(), -1);

    let wide: Number = ints(&[&[1, 2, 3]]).into();
    assert_eq!(
        m.plus(&a, &wide),
        Err(NumError::ShapeMismatch { expected: (2, 2), got: (1, 3) })
    );
}

#[test]
fn float_matrix_tower() {
    let m = Tower::float_matrices();
    let a: Number = Matrix::from_rows([[Number::Float(0.5), n(1)]]).unwrap().into();
    let doubled = m.times(&n(2), &a).unwrap();
    assert_eq!(doubled.to_string(), "[ [ 1, 2 ] ]");
}
