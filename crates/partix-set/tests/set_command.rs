//! End-to-end set commands on multi-rank clusters

use partix_core::{EntityId, Particle};
use partix_hub::Cluster;
use partix_script::ScenarioDef;
use partix_set::{run, run_line, Error, Severity};
use std::f64::consts::PI;

/// Ten particles along x in a cell that is non-periodic in x
fn row(ranks: usize, dimension: &str, capabilities: &str) -> Cluster {
    let particles: Vec<String> = (1..=10)
        .map(|i| {
            format!(
                "(id: {i}, type_id: {t}, x: ({x}, 1.0, 0.0), molecule: {m}, groups: [{g}])",
                t = if i <= 5 { 1 } else { 2 },
                x = i as f64 - 0.5,
                m = (i + 1) / 2,
                g = if i % 2 == 0 { "\"even\"" } else { "" },
            )
        })
        .collect();
    let ron = format!(
        r#"(
            cluster: (ranks: {ranks}, ghost_cutoff: 1.2),
            cell: (
                dimension: {dimension},
                lo: (0.0, 0.0, -0.5),
                hi: (10.0, 2.0, 0.5),
                periodic: (false, true, true),
            ),
            capabilities: ({capabilities}),
            types: (atom: 2, bond: 2, angle: 2),
            groups: ["even"],
            regions: {{
                "middle": (shape: Block(lo: (3.0, 0.0, -1.0), hi: (7.0, 2.0, 1.0))),
                "ends": (shape: Block(lo: (1.0, 0.0, -1.0), hi: (9.0, 2.0, 1.0)), side: Out),
            }},
            properties: [(name: "flux", width: 2)],
            particles: [{}],
        )"#,
        particles.join(",\n")
    );
    ScenarioDef::from_ron(&ron).unwrap().build().unwrap()
}

fn ids_where(cluster: &Cluster, f: impl Fn(&Particle) -> bool) -> Vec<u64> {
    let mut ids: Vec<_> = cluster.particles().filter(|p| f(p)).map(|p| p.id.raw()).collect();
    ids.sort();
    ids
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12 * b.abs().max(1.0)
}

#[test]
fn test_id_range_sets_z() {
    let mut cluster = row(3, "Three", "tags: true");
    let before: Vec<Particle> = cluster.particles().cloned().collect();

    let reports = run(&mut cluster, &["atom", "3*5", "z", "2.0"]).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].count, 3);
    assert_eq!(reports[0].to_string(), "  3 settings made for z");

    assert_eq!(ids_where(&cluster, |p| p.x[2] == 2.0), vec![3, 4, 5]);
    for old in &before {
        let (_, new) = cluster.locate(old.id).unwrap();
        if !(3..=5).contains(&old.id.raw()) {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_image_on_non_periodic_axis_is_fatal() {
    let mut cluster = row(2, "Three", "tags: true");
    let err = run(&mut cluster, &["atom", "1*10", "image", "1", "NULL", "NULL"]).unwrap_err();
    assert_eq!(err, Error::NonPeriodicImage('x'));
    assert_eq!(err.severity(), Severity::RunFatal);
    assert!(cluster.particles().all(|p| p.image == [0, 0, 0]));

    let reports = run_line(&mut cluster, "atom 1*10 image NULL 2 -1").unwrap();
    assert_eq!(reports[0].count, 10);
    assert!(cluster.particles().all(|p| p.image == [0, 2, -1]));
}

#[test]
fn test_density_round_trip() {
    for (dimension, expected) in [("Three", 4.0 / 3.0 * PI * 0.125), ("Two", PI * 0.25)] {
        let mut cluster = row(2, dimension, "tags: true, radius: true, rmass: true");
        run_line(&mut cluster, "atom * diameter 1.0 density 1.0").unwrap();
        for p in cluster.particles() {
            assert!(close(p.rmass, expected), "{dimension}: {}", p.rmass);
        }

        run_line(&mut cluster, "atom * density 3.0").unwrap();
        assert!(cluster.particles().all(|p| close(p.rmass, 3.0 * expected)));
    }
}

#[test]
fn test_idempotent() {
    let mut once = row(2, "Three", "tags: true, charge: true");
    let mut twice = row(2, "Three", "tags: true, charge: true");
    run_line(&mut once, "type 2 charge -0.5 vy 1.25").unwrap();
    run_line(&mut twice, "type 2 charge -0.5 vy 1.25").unwrap();
    run_line(&mut twice, "type 2 charge -0.5 vy 1.25").unwrap();

    let a: Vec<Particle> = once.particles().cloned().collect();
    for p in &a {
        assert_eq!(twice.locate(p.id).map(|(_, q)| q), Some(p));
    }
}

#[test]
fn test_selection_styles() {
    let mut cluster = row(3, "Three", "tags: true, molecule: true");

    run_line(&mut cluster, "group even vx 1.0").unwrap();
    assert_eq!(ids_where(&cluster, |p| p.v[0] == 1.0), vec![2, 4, 6, 8, 10]);

    run_line(&mut cluster, "region middle vy 1.0").unwrap();
    assert_eq!(ids_where(&cluster, |p| p.v[1] == 1.0), vec![4, 5, 6, 7]);

    run_line(&mut cluster, "region ends vz 1.0").unwrap();
    assert_eq!(ids_where(&cluster, |p| p.v[2] == 1.0), vec![1, 10]);

    run_line(&mut cluster, "mol 2*3 mol 0").unwrap();
    assert_eq!(ids_where(&cluster, |p| p.molecule == 0), vec![3, 4, 5, 6]);

    let reports = run_line(&mut cluster, "mol 0 charge 1.0");
    assert_eq!(reports, Err(Error::Unsupported("charge".to_string())));
    let reports = run_line(&mut cluster, "mol 0 type 2").unwrap();
    assert_eq!(reports[0].count, 4);

    assert_eq!(
        run_line(&mut cluster, "group odd vx 1.0"),
        Err(Error::UnknownGroup("odd".to_string()))
    );
}

#[test]
fn test_type_fraction_reports_reassigned_only() {
    let mut cluster = row(2, "Three", "tags: true");
    let reports = run_line(&mut cluster, "type 1 type/fraction 2 0.5 1234").unwrap();
    let changed = ids_where(&cluster, |p| p.id.raw() <= 5 && p.type_id == 2);
    assert_eq!(reports[0].keyword, "type/fraction");
    assert_eq!(reports[0].count, changed.len() as u64);
    assert_eq!(ids_where(&cluster, |p| p.id.raw() > 5 && p.type_id != 2), Vec::<u64>::new());
}

#[test]
fn test_property_array() {
    let mut cluster = row(2, "Three", "tags: true");
    let reports = run_line(&mut cluster, "atom 9* property/atom flux 0.5 -0.5 x 0.25").unwrap();
    let keywords: Vec<_> = reports.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["property/atom", "x"]);

    let (_, p) = cluster.locate(EntityId(9)).unwrap();
    assert_eq!(p.properties["flux"], vec![0.5, -0.5]);
    assert_eq!(p.x[0], 0.25);
    let (_, p) = cluster.locate(EntityId(1)).unwrap();
    assert_eq!(p.properties["flux"], vec![0.0, 0.0]);
}

#[test]
fn test_dipole_magnitude_invariant() {
    let mut cluster = row(3, "Three", "tags: true, dipole: true");
    run_line(&mut cluster, "atom *5 dipole 1.0 2.0 2.0").unwrap();
    run_line(&mut cluster, "atom 6* dipole/random 99 0.75").unwrap();
    for p in cluster.particles() {
        let norm = (p.mu[0] * p.mu[0] + p.mu[1] * p.mu[1] + p.mu[2] * p.mu[2]).sqrt();
        assert!(close(p.mu[3], norm));
    }
    let (_, p) = cluster.locate(EntityId(2)).unwrap();
    assert_eq!(p.mu, [1.0, 2.0, 2.0, 3.0]);
}

#[test]
fn test_orientation_needs_shape() {
    let mut cluster = row(2, "Three", "tags: true, ellipsoid: true");
    run_line(&mut cluster, "atom *4 shape 1.0 2.0 3.0").unwrap();
    run_line(&mut cluster, "atom *4 quat 0 0 1 180").unwrap();
    let (_, p) = cluster.locate(EntityId(1)).unwrap();
    let q = p.shape.as_ref().and_then(|s| s.quat()).copied().unwrap();
    assert!(q[0].abs() < 1e-12 && close(q[3], 1.0));

    let err = run_line(&mut cluster, "atom * quat/random 7").unwrap_err();
    assert_eq!(err.severity(), Severity::ProcessLocal);
}
