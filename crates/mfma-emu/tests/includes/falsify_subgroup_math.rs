/// Prediction: the identity fixture yields {i + [i%4 == 0], [i%4 == 1], ...}
/// Failure: a lane read the wrong staging slot or skipped a reduction step
#[test]
fn falsify_identity_fixture_element_by_element() {
    let ops = Fixture::Identity.init();
    let mut c = ops.c;
    launch_kernel(&ops.a, &ops.b, &mut c).unwrap();
    let expected = common::identity_expected();
    for lane in 0..LANES_PER_SUBGROUP {
        for p in 0..4 {
            assert_eq!(
                c[lane][p], expected[lane][p],
                "lane {lane} element {p}: got {} expected {}",
                c[lane][p], expected[lane][p]
            );
        }
    }
    // Spot checks straight from the formula.
    assert_eq!(c[0], [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(c[1], [1.0, 1.0, 0.0, 0.0]);
    assert_eq!(c[19], [19.0, 0.0, 0.0, 1.0]);
}

/// Prediction: emulated C equals c0 + A*B in dense matrix form
/// Failure: layout of A/B/C across lanes disagrees with the instruction
#[test]
fn falsify_dense_matrix_semantics() {
    let a = common::scrambled(1, 4.0);
    let b = common::scrambled(2, 4.0);
    let c0: [Floatx4; LANES_PER_SUBGROUP] = std::array::from_fn(|i| [i as f32; 4]);
    let mut c = c0;
    launch_kernel(&a, &b, &mut c).unwrap();

    let dense_a = a_matrix(&a);
    let dense_b = b_matrix(&b);
    let dense_c0 = c_matrix(&c0);
    for lane in LaneId::all() {
        for p in 0..4 {
            let (row, col) = c_row_col(lane, p);
            let mut want = dense_c0[row * 16 + col];
            for k in 0..TILE_K {
                want += dense_a[row * TILE_K + k] * dense_b[k * 16 + col];
            }
            assert_eq!(c[lane.index()][p], want, "C[{row},{col}]");
        }
    }
}

/// Prediction: the ramp fixture matches the reference at 0 ULP
/// Failure: summation order differs between lanes and reference
#[test]
fn falsify_ramp_matches_reference() {
    let ops = Fixture::Ramp.init();
    let expected = mfma_reference(&ops.a, &ops.b, &ops.c);
    let (got, _) = ops.run_on(&mut Subgroup::new()).unwrap();
    compare_accumulators(&got, &expected, 0).unwrap();
}

/// Prediction: zero operands leave the accumulator untouched
/// Failure: stale staging data from an earlier launch leaked in
#[test]
fn falsify_zero_operands_after_nonzero_launch() {
    let mut subgroup = Subgroup::new();
    let mut warm = [[0.0; 4]; 64];
    launch(&mut subgroup, &[3.0; 64], &[5.0; 64], &mut warm).unwrap();
    let c0: [Floatx4; 64] = std::array::from_fn(|i| [i as f32, -(i as f32), 0.5, 0.0]);
    let mut c = c0;
    launch(&mut subgroup, &[0.0; 64], &[0.0; 64], &mut c).unwrap();
    assert_eq!(c, c0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Prediction: arbitrary operands match the scalar reference at 0 ULP
    /// Failure: a lane reduced before every publish was visible
    #[test]
    fn falsify_random_operands_match_reference(
        a_vals in proptest::collection::vec(-8.0f32..8.0, 64..=64),
        b_vals in proptest::collection::vec(-8.0f32..8.0, 64..=64),
        c_vals in proptest::collection::vec(-64.0f32..64.0, 256..=256),
    ) {
        let a: [f32; 64] = a_vals.try_into().unwrap();
        let b: [f32; 64] = b_vals.try_into().unwrap();
        let c0 = common::accumulators_from(&c_vals);
        let expected = mfma_reference(&a, &b, &c0);
        let mut c = c0;
        launch_kernel(&a, &b, &mut c).unwrap();
        prop_assert!(compare_accumulators(&c, &expected, 0).is_ok());
    }
}
