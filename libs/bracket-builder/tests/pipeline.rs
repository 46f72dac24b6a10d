use bracket_builder::{write_outputs, BracketBuilder, BracketParams, FilletStep, Variant};
use config::constants::Tessellation;
use solid_kernel::load_stl;

fn coarse() -> Tessellation {
    Tessellation::new(24, 2).unwrap()
}

fn build(params: BracketParams) -> bracket_builder::Bracket {
    BracketBuilder::new(params)
        .with_tessellation(coarse())
        .build()
        .unwrap()
}

#[test]
fn plain_bracket_is_cylinder_minus_slots() {
    let params = BracketParams::plain();
    let bracket = build(params.clone());

    let (min, max) = bracket.solid.bounding_box();
    assert!(min.x.abs() < 1e-9);
    assert!((max.x - 107.5).abs() < 1e-9);

    // Polygonal cross-section area times length, minus the two slot boxes
    // clipped to the body.
    let n = 24.0;
    let r = params.radius();
    let section = 0.5 * n * r * r * (std::f64::consts::TAU / n).sin();
    let full = section * params.total_length();
    assert!(bracket.report.volume_mm3 < full);
    assert!(bracket.report.volume_mm3 > 0.5 * full);
}

#[test]
fn build_is_deterministic() {
    let first = build(BracketParams::filleted());
    let second = build(BracketParams::filleted());

    assert_eq!(first.report.volume_mm3, second.report.volume_mm3);
    assert_eq!(first.report.triangle_count, second.report.triangle_count);

    let dir = tempfile::tempdir().unwrap();
    let a = write_outputs(&first.solid, dir.path(), "first").unwrap();
    let b = write_outputs(&second.solid, dir.path(), "second").unwrap();
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

    let reloaded = load_stl(&a).unwrap();
    let relative = (reloaded.volume() - first.report.volume_mm3).abs() / first.report.volume_mm3;
    assert!(relative < 1e-4);
}

#[test]
fn filleted_bracket_rounds_rims_and_drills_holes() {
    let bracket = build(BracketParams::filleted());
    let report = &bracket.report;

    assert!(matches!(report.rim_fillet, FilletStep::Applied { edges } if edges >= 2));
    assert_eq!(report.slot_fillet, FilletStep::Disabled);
    assert_eq!(report.gussets, 0);
    let holes = report.holes.unwrap();
    assert_eq!(holes.offsets.lateral, 6.0);
    assert!(holes.clearance.min() > 0.0);
}

#[test]
fn rim_fillet_removes_material() {
    let mut sharp = BracketParams::filleted();
    sharp.rim_fillet = None;
    let sharp = build(sharp);
    let rounded = build(BracketParams::filleted());

    assert!(rounded.report.volume_mm3 < sharp.report.volume_mm3);
}

#[test]
fn gussets_add_material() {
    let mut bare = BracketParams::reinforced();
    bare.gussets = None;
    bare.holes = None;
    bare.rim_fillet = None;
    let mut ribbed = bare.clone();
    ribbed.gussets = BracketParams::reinforced().gussets;

    let bare = build(bare);
    let ribbed = build(ribbed);
    assert_eq!(ribbed.report.gussets, 4);
    assert!(ribbed.report.volume_mm3 > bare.report.volume_mm3);
}

#[test]
fn reinforced_bracket_runs_every_step() {
    let bracket = build(Variant::Reinforced.params());
    let report = &bracket.report;

    assert_eq!(report.slot_fillet, FilletStep::Applied { edges: 4 });
    assert_eq!(report.gussets, 4);
    // Each slot splits its rim into two arcs
    assert_eq!(report.rim_fillet, FilletStep::Applied { edges: 4 });
    assert!(report.volume_mm3 > 0.0);
    assert!(bracket.solid.mesh().validate());
}
