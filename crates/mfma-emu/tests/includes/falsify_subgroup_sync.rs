/// Prediction: 63 of 64 arrivals never release; the 64th releases everyone
/// Failure: barrier releases early or strands a waiter
#[test]
fn falsify_barrier_capacity_64() {
    use std::thread;
    use std::time::Duration;

    let barrier = LaneBarrier::new(LANES_PER_SUBGROUP);
    thread::scope(|s| {
        let waiters: Vec<_> = LaneId::all()
            .take(63)
            .map(|lane| {
                let barrier = &barrier;
                s.spawn(move || barrier.arrive_and_wait(lane).unwrap())
            })
            .collect();

        while barrier.arrived() < 63 {
            thread::sleep(Duration::from_millis(1));
        }
        thread::sleep(Duration::from_millis(25));
        assert_eq!(barrier.generation(), 0);
        assert!(waiters.iter().all(|w| !w.is_finished()));

        let last = barrier
            .arrive_and_wait(LaneId::new(63).unwrap())
            .unwrap();
        assert!(last.is_leader);
        let leaders = waiters
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|r| {
                assert_eq!(r.generation, 1);
                r.is_leader
            })
            .count();
        assert_eq!(leaders, 0);
    });
}

/// Prediction: an extra arrival within one cycle is rejected, not counted
/// Failure: a 65th arrival silently completes or corrupts the cycle
#[test]
fn falsify_barrier_flags_extra_arrival() {
    use std::thread;
    use std::time::Duration;

    let barrier = LaneBarrier::new(LANES_PER_SUBGROUP);
    thread::scope(|s| {
        let waiters: Vec<_> = LaneId::all()
            .skip(1)
            .map(|lane| {
                let barrier = &barrier;
                s.spawn(move || barrier.arrive_and_wait(lane).unwrap())
            })
            .collect();
        while barrier.arrived() < 63 {
            thread::sleep(Duration::from_millis(1));
        }

        let err = barrier
            .arrive_and_wait(LaneId::new(5).unwrap())
            .unwrap_err();
        assert!(matches!(err, MfmaError::DuplicateArrival { lane: 5, generation: 1 }));
        assert_eq!(barrier.arrived(), 63);

        barrier.arrive_and_wait(LaneId::new(0).unwrap()).unwrap();
        for w in waiters {
            assert_eq!(w.join().unwrap().generation, 1);
        }
    });
}

/// Prediction: every slot is published exactly once per launch before release
/// Failure: the staging audit records a violation
#[test]
fn falsify_publish_once_per_cycle() {
    let mut subgroup = Subgroup::new();
    for cycle in 1..=10u32 {
        let ops = Fixture::Ramp.init();
        let (_, report) = ops.run_on(&mut subgroup).unwrap();
        assert_eq!(report.generation, u64::from(cycle));
        for slot in 0..LANES_PER_SUBGROUP {
            assert_eq!(subgroup.staging().publish_count(slot), cycle);
        }
    }
    assert!(subgroup.take_violations().is_empty());
}

/// Prediction: a stray publish fails only the launch it lands in
/// Failure: the subgroup stays poisoned and every later launch errors
#[test]
fn falsify_subgroup_recovers_after_stray_publish() {
    let mut subgroup = Subgroup::new();
    let ops = Fixture::Ramp.init();
    subgroup.staging().publish(LaneId::new(12).unwrap(), 1.0, 1.0);
    let err = ops.run_on(&mut subgroup).unwrap_err();
    assert!(matches!(
        err,
        MfmaError::PublishMismatch { slot: 12, expected: 1, found: 2 }
    ));

    let expected = mfma_reference(&ops.a, &ops.b, &ops.c);
    for cycle in 2..=4u64 {
        let (got, report) = ops.run_on(&mut subgroup).unwrap();
        assert_eq!(report.generation, cycle);
        assert!(bitwise_eq(&got, &expected));
    }
}

/// Prediction: the launch uses each lane id in 0..64 exactly once
/// Failure: duplicate or missing lane ids
#[test]
fn falsify_lane_ids_unique_and_complete() {
    let mut subgroup = Subgroup::new();
    // A lane's own slot carries its id; after the launch slot i must hold i.
    let ids: [f32; 64] = std::array::from_fn(|i| i as f32);
    let mut c = [[0.0; 4]; 64];
    launch(&mut subgroup, &ids, &ids, &mut c).unwrap();
    assert_eq!(subgroup.staging().a_tile(), ids.to_vec());
    assert_eq!(subgroup.staging().b_tile(), ids.to_vec());
}

/// Prediction: repeated launches are bit-for-bit identical
/// Failure: scheduling order leaks into the result
#[test]
fn falsify_determinism_across_launches() {
    let a = common::scrambled(7, 3.0);
    let b = common::scrambled(11, 3.0);
    let c0 = common::accumulators_from(&(0..256).map(|i| (i as f32).sin()).collect::<Vec<_>>());

    let mut first = c0;
    launch_kernel(&a, &b, &mut first).unwrap();

    let mut shared = Subgroup::new();
    for _ in 0..20 {
        let mut fresh = c0;
        launch_kernel(&a, &b, &mut fresh).unwrap();
        assert!(bitwise_eq(&first, &fresh));

        let mut reused = c0;
        launch(&mut shared, &a, &b, &mut reused).unwrap();
        assert!(bitwise_eq(&first, &reused));
    }
}

/// Prediction: a lane outside the subgroup is rejected at construction
/// Failure: lane 64 silently aliases another lane's slot
#[test]
fn falsify_second_subgroup_lane_rejected() {
    assert!(matches!(
        LaneId::new(LANES_PER_SUBGROUP),
        Err(MfmaError::LaneOutOfRange { lane: 64, lanes: 64 })
    ));
}
