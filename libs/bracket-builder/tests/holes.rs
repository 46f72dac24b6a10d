use bracket_builder::{BracketParams, HolePattern, HolePlacement};
use config::constants::{HOLE_MAX_LATERAL, HOLE_WALL_MARGIN};

fn derived(diameter: f64) -> HolePattern {
    HolePattern {
        diameter,
        placement: HolePlacement::Derived {
            max_lateral: HOLE_MAX_LATERAL,
            wall_margin: HOLE_WALL_MARGIN,
        },
    }
}

#[test]
fn total_length_is_sum_of_depths_and_gap() {
    for depth in [10.0, 25.0, 30.0, 42.5] {
        for gap in [5.0, 47.5, 120.0] {
            let mut params = BracketParams::filleted();
            params.engagement_depth = depth;
            params.board_gap = gap;
            assert_eq!(params.total_length(), depth + depth + gap);
        }
    }
}

#[test]
fn scenario_107_5() {
    let mut params = BracketParams::filleted();
    params.cylinder_diameter = 35.0;
    params.engagement_depth = 30.0;
    params.board_gap = 47.5;
    assert_eq!(params.total_length(), 107.5);
}

#[test]
fn derived_holes_stay_inside_body_and_clear_of_slot() {
    for diameter in [20.0_f64, 30.0, 35.0, 40.0, 60.0] {
        for width_a in [4.0_f64, 10.0, 16.3, 19.0, 30.0, 39.0] {
            for width_b in [6.0_f64, 18.5, 25.0, 34.9] {
                if width_a.min(width_b) >= diameter {
                    continue;
                }
                let mut params = BracketParams::filleted();
                params.cylinder_diameter = diameter;
                params.slot_width_a = width_a;
                params.slot_width_b = width_b;

                for hole_diameter in [2.0_f64, 3.3, 5.3] {
                    let pattern = derived(hole_diameter);
                    let r = params.radius();
                    let offsets = pattern.offsets(&params);
                    assert!(offsets.lateral >= 0.0);
                    assert!(offsets.vertical > params.narrow_slot_width() / 2.0);

                    for center in pattern.positions(&params) {
                        assert!(
                            center.length() < r,
                            "hole centre {:?} outside radius {} (d={}, a={}, b={})",
                            center,
                            r,
                            diameter,
                            width_a,
                            width_b
                        );
                        assert!(center.y.abs() > params.narrow_slot_width() / 2.0);
                    }
                }
            }
        }
    }
}

#[test]
fn preset_holes_have_positive_clearance() {
    for params in [BracketParams::filleted(), BracketParams::reinforced()] {
        let pattern = params.holes.unwrap();
        let clearance = pattern.offsets(&params).clearance(&params, pattern.radius());
        assert!(clearance.wall > 0.0);
        assert!(clearance.slot > 0.0);
        assert!(clearance.between > 0.0);
    }
}
