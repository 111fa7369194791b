use approx::assert_relative_eq;

use numtower::linalg::DEFAULT_EPSILON;
use numtower::{BigInt, BigInts, Floats, Fractions, Linalg, Matrix, NumError, Number, Tower, Vector};

fn numbers(rows: &[&[i64]]) -> Matrix<Number> {
    Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| Number::from(x)))).unwrap()
}

fn bigs(rows: &[&[i64]]) -> Matrix<BigInt> {
    Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| BigInt::from(x)))).unwrap()
}

// ── Over the rational tower ─────────────────────────────────────────

#[test]
fn triangular_determinant_and_rank() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let a = numbers(&[&[1, 2, 3], &[0, 4, 5], &[0, 0, 6]]);
    assert_eq!(la.determinant(&a).unwrap(), Number::from(24));
    assert_eq!(la.rank(&a).unwrap(), 3);

    let t = la.triangulation(&a).unwrap();
    assert_eq!(la.matrix_times(&t.u, &a).unwrap(), t.r);
}

#[test]
fn solve_satisfies_the_system() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let a = numbers(&[&[1, 2, 3], &[0, 4, 5], &[0, 0, 6]]);
    let b = numbers(&[&[1], &[1], &[1]]);
    let x = la.solve(&a, &b).unwrap().unwrap();
    assert_eq!(la.matrix_times(&a, &x).unwrap(), b);
    assert_eq!(x.column(0).to_string(), "[ 5/12, 1/24, 1/6 ]");
}

#[test]
fn singular_matrix() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let a = numbers(&[&[1, 2, 3], &[2, 4, 6], &[3, 6, 9]]);
    assert_eq!(la.rank(&a).unwrap(), 1);
    assert_eq!(la.determinant(&a).unwrap(), Number::from(0));
    assert_eq!(la.inverse(&a).unwrap(), None);

    let n = la.null_space(&a).unwrap().unwrap();
    assert_eq!(n.shape(), (3, 2));
    assert_eq!(la.matrix_times(&a, &n).unwrap(), numbers(&[&[0, 0], &[0, 0], &[0, 0]]));
}

#[test]
fn inverse_round_trip() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let a = numbers(&[&[1, 2, 0, 1], &[0, 1, 1, 0], &[0, 0, 1, 2], &[3, 0, 0, 1]]);
    let inv = la.inverse(&a).unwrap().unwrap();
    assert_eq!(la.matrix_times(&a, &inv).unwrap(), la.identity(4));
    assert_eq!(la.matrix_times(&inv, &a).unwrap(), la.identity(4));
}

#[test]
fn ring_mode_on_the_integer_tower() {
    let z = Tower::integers();
    let la = Linalg::new(&z).over_ring();
    let a = numbers(&[&[4, 6], &[2, 7]]);
    assert_eq!(la.determinant(&a).unwrap(), Number::from(16));
    assert_eq!(la.solve(&a, &numbers(&[&[1], &[0]])).unwrap(), None);
    let x = la.solve(&a, &numbers(&[&[10], &[9]])).unwrap().unwrap();
    assert_eq!(x, numbers(&[&[1], &[1]]));
}

#[test]
fn ring_solve_reaches_free_variables() {
    let la = Linalg::new(&BigInts).over_ring();
    let x = la.solve(&bigs(&[&[2, 3]]), &bigs(&[&[1]])).unwrap();
    assert_eq!(x, Some(bigs(&[&[-1], &[1]])));

    let z = Tower::integers();
    let lz = Linalg::new(&z).over_ring();
    let a = numbers(&[&[4, 6, 9]]);
    let b = numbers(&[&[1]]);
    let x = lz.solve(&a, &b).unwrap().unwrap();
    assert_eq!(lz.matrix_times(&a, &x).unwrap(), b);
}

#[test]
fn big_entries_stay_exact() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let big = q.parse("100000000000000000000").unwrap();
    let a = Matrix::from_rows([[big.clone(), Number::from(1)], [Number::from(1), big.clone()]]).unwrap();
    let det = la.determinant(&a).unwrap();
    assert_eq!(det.to_string(), "9999999999999999999999999999999999999999");
}

// ── Systems with a known solution ───────────────────────────────────

fn systems() -> Vec<(Matrix<Number>, Matrix<Number>)> {
    vec![
        (numbers(&[&[18, 12, 14], &[8, 10, 7], &[5, 10, 5]]), numbers(&[&[18], &[21], &[12]])),
        (numbers(&[&[1, 0, -1, 2]]), numbers(&[&[1], &[2], &[3], &[4]])),
        (numbers(&[&[13, 18, 4], &[10, 17, 3], &[3, 1, 1]]), numbers(&[&[18], &[10], &[0]])),
        (numbers(&[&[6, 3], &[0, 5]]), numbers(&[&[2], &[3]])),
        (numbers(&[&[5, 1, 2], &[10, 8, 5], &[5, 7, 3]]), numbers(&[&[3], &[7], &[0]])),
        (numbers(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]), numbers(&[&[0], &[0], &[0]])),
    ]
}

/// Solve `a · x = a · v` and check the kernels and bases of `a` against its rank.
fn check_system(la: &Linalg<'_, Tower>, a: &Matrix<Number>, v: &Matrix<Number>) {
    let b = la.matrix_times(a, v).unwrap();
    let x = la.solve(a, &b).unwrap().unwrap();
    assert_eq!(la.matrix_times(a, &x).unwrap(), b, "{a}");

    let rank = la.rank(a).unwrap();
    let reduced = la.reduced_basis(a).unwrap();
    assert_eq!(reduced.map_or(0, |r| r.nrows()), rank, "{a}");

    match la.null_space(a).unwrap() {
        Some(n) => {
            assert_eq!(n.ncols(), a.ncols() - rank);
            assert_eq!(la.matrix_times(a, &n).unwrap(), la.zeros(a.nrows(), n.ncols()));
        }
        None => assert_eq!(rank, a.ncols()),
    }

    match la.left_null_space(a).unwrap() {
        Some(l) => {
            assert_eq!(l.nrows(), a.nrows() - rank);
            assert_eq!(la.matrix_times(&l, a).unwrap(), la.zeros(l.nrows(), a.ncols()));
        }
        None => assert_eq!(rank, a.nrows()),
    }
}

#[test]
fn known_solutions_over_the_integer_tower() {
    let z = Tower::integers();
    let la = Linalg::new(&z).over_ring();
    for (a, v) in systems() {
        check_system(&la, &a, &v);
    }
}

#[test]
fn known_solutions_over_the_rational_tower() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    for (a, v) in systems() {
        check_system(&la, &a, &v);
    }

    let a = numbers(&[&[5, 1, 2], &[10, 8, 5], &[5, 7, 3]]);
    let v = Matrix::from_rows([[q.parse("3/5").unwrap()], [Number::from(7)], [Number::from(0)]]).unwrap();
    check_system(&la, &a, &v);
}

#[test]
fn right_inverse_of_a_wide_matrix() {
    let a = numbers(&[&[1, 2, 0, 1], &[0, 1, 1, 0], &[0, 0, 1, 2]]);
    for (tower, field) in [(Tower::integers(), false), (Tower::rationals(), true)] {
        let la = Linalg::new(&tower).over_field(field);
        let x = la.solve(&a, &la.identity(3)).unwrap().unwrap();
        assert_eq!(x.shape(), (4, 3));
        assert_eq!(la.matrix_times(&a, &x).unwrap(), la.identity(3));
    }
}

// ── Statically typed scalars ────────────────────────────────────────

#[test]
fn typed_rationals() {
    let q = Fractions::new(&BigInts);
    let la = Linalg::new(&q);
    let a = bigs(&[&[2, -1, 0], &[-1, 2, -1], &[0, -1, 2]]).map(|x| q.promote(x.clone()));
    assert_eq!(la.determinant(&a).unwrap(), q.promote(BigInt::from(4)));
    let inv = la.inverse(&a).unwrap().unwrap();
    assert_eq!(inv[(0, 0)], q.make(BigInt::from(3), BigInt::from(4)).unwrap());
    assert_eq!(inv[(1, 1)], q.promote(BigInt::from(1)));
}

#[test]
fn typed_integers_null_space() {
    let la = Linalg::new(&BigInts).over_ring();
    let a = bigs(&[&[1, 2, 3, 4], &[2, 3, 4, 5]]);
    let n = la.null_space(&a).unwrap().unwrap();
    assert_eq!(n.shape(), (4, 2));
    assert_eq!(la.matrix_times(&a, &n).unwrap(), la.zeros(2, 2));
}

#[test]
fn cross_product_and_norm() {
    let la = Linalg::new(&Floats);
    let x = Vector::from_vec(vec![1.0, 0.0, 0.0]).unwrap();
    let y = Vector::from_vec(vec![0.0, 1.0, 0.0]).unwrap();
    let z = la.cross_product(&x, &y).unwrap();
    assert_eq!(z.as_slice(), &[0.0, 0.0, 1.0]);
    assert_relative_eq!(la.norm(&z).unwrap(), 1.0);
}

// ── Floats ──────────────────────────────────────────────────────────

#[test]
fn float_solve_and_inverse() {
    let la = Linalg::new(&Floats).with_epsilon(DEFAULT_EPSILON);
    let a = Matrix::from_rows([[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]]).unwrap();
    let b = Matrix::from_rows([[8.0], [-11.0], [-3.0]]).unwrap();
    let x = la.solve(&a, &b).unwrap().unwrap();
    assert_relative_eq!(x[(0, 0)], 2.0, epsilon = 1e-12);
    assert_relative_eq!(x[(1, 0)], 3.0, epsilon = 1e-12);
    assert_relative_eq!(x[(2, 0)], -1.0, epsilon = 1e-12);

    let inv = la.inverse(&a).unwrap().unwrap();
    let p = la.cleanup(&la.matrix_times(&a, &inv).unwrap()).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(p[(i, j)], if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
        }
    }
    assert_relative_eq!(la.determinant(&a).unwrap(), -1.0, epsilon = 1e-12);
}

#[test]
fn orthonormalized_float_rows() {
    let la = Linalg::new(&Floats).with_epsilon(DEFAULT_EPSILON);
    let a = Matrix::from_rows([[1.0, 2.0, 2.0], [0.0, 1.0, 1.0], [1.0, 0.0, 3.0]]).unwrap();
    let o = la.orthonormalized(&a).unwrap();
    let p = la.cleanup(&la.matrix_times(&o, &o.transposed()).unwrap()).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(p[(i, j)], if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
        }
    }
}

#[test]
fn shape_errors() {
    let q = Tower::rationals();
    let la = Linalg::new(&q);
    let a = numbers(&[&[1, 2, 3], &[4, 5, 6]]);
    assert_eq!(
        la.determinant(&a),
        Err(NumError::NotSquare { nrows: 2, ncols: 3 })
    );
    assert_eq!(
        la.solve(&a, &numbers(&[&[1]])),
        Err(NumError::ShapeMismatch { expected: (2, 1), got: (1, 1) })
    );
    assert!(matches!(la.matrix_times(&a, &a), Err(NumError::ShapeMismatch { .. })));
}
