use polyfactor::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const STRATEGIES: [SplittingStrategy; 3] = [
    SplittingStrategy::CantorZassenhaus,
    SplittingStrategy::TraceSplit,
    SplittingStrategy::PeriodSplit,
];

fn from_bits<P: UnivariatePolynomial>(bits: u64) -> P {
    (0..64)
        .filter(|i| bits >> i & 1 == 1)
        .fold(P::zero(), |acc, i| acc + P::monomial(i).unwrap())
}

fn assert_factors_into<P: UnivariatePolynomial>(product: u64, factors: [u64; 2]) {
    let f = from_bits::<P>(product);
    let mut expected = factors.map(from_bits::<P>).to_vec();
    expected.sort();

    let mut rng = StdRng::seed_from_u64(product);
    for strategy in STRATEGIES {
        let mut irreducibles = factorization::factorize(&f, 2, strategy, &mut rng).unwrap();
        irreducibles.sort();
        assert_eq!(expected, irreducibles, "{strategy}");
    }
}

#[test]
fn degree_fourteen_product_over_gf2() {
    assert_factors_into::<Polynomial<F2>>(0x73AF, [0x83, 0xE5]);
    assert_factors_into::<SparseGf2Polynomial>(0x73AF, [0x83, 0xE5]);
    assert_factors_into::<Gf2Bitset>(0x73AF, [0x83, 0xE5]);
}

#[test]
fn degree_thirty_product_over_gf2() {
    assert_factors_into::<Polynomial<F2>>(0x7383_77C1, [0xCD55, 0xB0C5]);
    assert_factors_into::<SparseGf2Polynomial>(0x7383_77C1, [0xCD55, 0xB0C5]);
    assert_factors_into::<Gf2Bitset>(0x7383_77C1, [0xCD55, 0xB0C5]);
}

#[test]
fn product_of_irreducibles_is_coprime_to_unrelated_polynomial() {
    let f = from_bits::<SparseGf2Polynomial>(0x73AF);
    let g = SparseGf2Polynomial::from_exponents([11, 9, 7, 5, 4, 3, 0]);
    assert!(f.gcd(&g).unwrap().is_one());
}

#[test]
fn repeated_factors_over_gf3() {
    type F3 = PrimeFieldElement<3>;

    // (X + 1)·(X² + 1)³·(X + 2)⁴
    let f = Polynomial::<F3>::from([1, 0, 2, 2, 0, 1, 1, 0, 2, 2, 0, 1]);
    let square_free = factorization::square_free_factors(&f, 3).unwrap();
    assert_eq!(3, square_free.len());

    let mut rng = StdRng::seed_from_u64(3);
    let factors = factorization::factorize(&f, 3, SplittingStrategy::default(), &mut rng).unwrap();
    let linear = factors.iter().filter(|factor| factor.degree() == 1).count();
    let quadratic = factors.iter().filter(|factor| factor.degree() == 2).count();
    assert_eq!(5, linear);
    assert_eq!(3, quadratic);
}

#[test]
fn distinct_degree_buckets_over_gf5() {
    type F5 = PrimeFieldElement<5>;

    let f = Polynomial::<F5>::from([4, 2, 4, 4, 2, 0, 1]);
    let buckets = factorization::distinct_degree_factors(&f, 5).unwrap();
    assert_eq!(Polynomial::from([2, 3, 1]), buckets[0]);
    assert_eq!(Polynomial::from([2, 3, 4, 2, 1]), buckets[1]);

    let mut rng = StdRng::seed_from_u64(5);
    for strategy in STRATEGIES {
        let factors = factorization::factorize_with_multiplicities(&f, 5, strategy, &mut rng)
            .unwrap()
            .into_iter()
            .map(|factor| factor.polynomial)
            .collect::<Vec<_>>();
        let expected = vec![
            Polynomial::from([1, 1]),
            Polynomial::from([2, 1]),
            Polynomial::from([1, 1, 1]),
            Polynomial::from([2, 1, 1]),
        ];
        assert_eq!(expected, factors, "{strategy}");
    }
}

#[test]
fn failures_are_typed() {
    let mut rng = StdRng::seed_from_u64(0);

    let zero = Polynomial::<F2>::zero();
    let err = factorization::factorize(&zero, 2, SplittingStrategy::default(), &mut rng);
    assert_eq!(Err(FactorizationError::ZeroPolynomial), err);

    let f = Polynomial::<F2>::from([1, 1, 1]);
    let err = factorization::factorize(&f, 3, SplittingStrategy::default(), &mut rng);
    assert_eq!(
        Err(FactorizationError::CharacteristicMismatch {
            expected: 2,
            actual: 3
        }),
        err
    );

    let budget = SplitBudget {
        max_attempts: 0,
        max_period: 1,
    };
    let f = from_bits::<Gf2Bitset>(0x73AF);
    let err = factorization::factorize_with_budget(
        &f,
        2,
        SplittingStrategy::CantorZassenhaus,
        &mut rng,
        budget,
    );
    assert_eq!(
        Err(FactorizationError::Exhausted {
            strategy: SplittingStrategy::CantorZassenhaus,
            attempts: 0
        }),
        err
    );
}

#[test]
fn dense_capacity_is_reported() {
    let a = DenseGf2Polynomial::<1>::from_exponents([40, 0]).unwrap();
    let err = a.try_mul(&a).unwrap_err();
    assert_eq!(
        PolynomialError::CapacityExceeded {
            degree: 80,
            capacity: 64
        },
        err
    );
}

#[test]
fn dense_polynomial_beyond_half_capacity_is_factored() {
    // X⁵¹² + X is the product of all irreducibles of degree 1, 3 and 9
    let field_polynomial = Gf2Bitset::from_exponents([512, 1]).unwrap();
    let septic = Gf2Bitset::from_exponents([7, 1, 0]).unwrap();
    let f = field_polynomial.try_mul(&septic).unwrap();
    assert_eq!(519, f.degree());

    let mut rng = StdRng::seed_from_u64(519);
    for strategy in STRATEGIES {
        let factors = factorization::factorize(&f, 2, strategy, &mut rng).unwrap();
        assert_eq!(61, factors.len(), "{strategy}");

        let num_factors_of_degree = |d| factors.iter().filter(|g| g.degree() == d).count();
        assert_eq!(2, num_factors_of_degree(1));
        assert_eq!(2, num_factors_of_degree(3));
        assert_eq!(1, num_factors_of_degree(7));
        assert_eq!(56, num_factors_of_degree(9));
        assert!(factors.contains(&septic));

        let product = factors
            .iter()
            .fold(Gf2Bitset::one(), |acc, g| acc.try_mul(g).unwrap());
        assert_eq!(f, product, "{strategy}");
    }
}
