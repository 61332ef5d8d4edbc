//! CLI command implementations.

use std::path::Path;

use squish_contact::{BoxBroadPhase, BroadPhase};
use squish_io::contract::{SimulationInput, SimulationMetrics, SimulationOutput, SimulationParams};
use squish_mesh::loader::load_tet_mesh;
use squish_solver::{SolverConfig, XpbdSolver};
use squish_telemetry::sinks::{StatsSink, TracingSink};
use squish_telemetry::{EventBus, EventKind, SimulationEvent};

/// Run a simulation from a scene file.
pub fn simulate(
    scene_path: &str,
    duration: f32,
    substeps: u32,
    verbose: bool,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = squish_io::scene::load_scene(scene_path)?;

    // The scene's mesh file is resolved next to the scene itself
    let scene_dir = Path::new(scene_path).parent().unwrap_or_else(|| Path::new("."));
    let mut mesh = load_tet_mesh(scene_dir.join(&scene.mesh_file))?;
    mesh.apply_transform(&scene.transform);

    let config = SolverConfig {
        n_substeps: substeps,
        edge_compliance: scene.edge_compliance,
        volume_compliance: scene.volume_compliance,
        ..Default::default()
    };
    let mut solver = XpbdSolver::from_mesh(&mesh, config)?;
    let mut broad = BoxBroadPhase::new(scene.obstacles.clone());

    let mut bus = EventBus::new();
    bus.set_enabled(verbose);
    bus.add_sink(Box::new(TracingSink::new()));
    bus.add_sink(Box::new(StatsSink::new()));

    println!("squish Simulation");
    println!("─────────────────");
    println!("Scene:       {scene_path}");
    println!("Mesh:        {} ({} particles, {} tets)",
        scene.mesh_file,
        mesh.vertex_count(),
        mesh.tet_count(),
    );
    println!("Obstacles:   {}", scene.obstacles.len());
    println!(
        "Clusters:    {} edge, {} volume",
        solver.edge_clusters().cluster_count(),
        solver.volume_clusters().cluster_count(),
    );
    println!();

    bus.emit(SimulationEvent::new(
        0,
        EventKind::ConstraintBuild {
            edges: solver.constraints().lengths.len() as u32,
            tets: solver.constraints().volumes.len() as u32,
            degenerate_tets: solver.constraints().degenerate_tets,
        },
    ));
    bus.emit(SimulationEvent::new(
        0,
        EventKind::Coloring {
            kind: "edge".into(),
            clusters: solver.edge_clusters().cluster_count() as u32,
            constraints: solver.constraints().lengths.len() as u32,
        },
    ));
    bus.emit(SimulationEvent::new(
        0,
        EventKind::Coloring {
            kind: "volume".into(),
            clusters: solver.volume_clusters().cluster_count() as u32,
            constraints: solver.constraints().volumes.len() as u32,
        },
    ));

    let frame_dt = squish_types::constants::DEFAULT_FRAME_DT;
    let frames = (duration / frame_dt).ceil() as u32;
    let mut total_wall = 0.0f64;
    let mut final_ke = 0.0f64;

    for frame in 0..frames {
        broad.update(solver.state());
        bus.emit(SimulationEvent::new(
            frame,
            EventKind::BroadPhase {
                obstacles: scene.obstacles.len() as u32,
                overlapping: broad.overlap_count() as u32,
            },
        ));

        let result = match solver.step(frame_dt) {
            Ok(result) => result,
            Err(e) => {
                bus.emit(SimulationEvent::new(
                    frame,
                    EventKind::Instability {
                        detail: e.to_string(),
                    },
                ));
                bus.finalize();
                return Err(e.into());
            }
        };

        total_wall += result.wall_time;
        final_ke = result.kinetic_energy;
        bus.emit(SimulationEvent::new(
            frame,
            EventKind::StepEnd {
                wall_time: result.wall_time,
                substeps: result.substeps,
            },
        ));
        bus.emit(SimulationEvent::new(
            frame,
            EventKind::Energy {
                kinetic: result.kinetic_energy,
            },
        ));
    }
    bus.finalize();

    let bounds = broad.bounds();
    println!("Frames:      {frames}");
    println!("Wall time:   {:.3}s", total_wall);
    println!("Avg step:    {:.3}ms", total_wall / frames as f64 * 1000.0);
    println!("Final KE:    {:.6e}", final_ke);
    println!(
        "Body AABB:   [{:.3} {:.3} {:.3}] – [{:.3} {:.3} {:.3}]",
        bounds.min.x, bounds.min.y, bounds.min.z,
        bounds.max.x, bounds.max.y, bounds.max.z,
    );

    if let Some(path) = output_path {
        let out = SimulationOutput {
            positions: solver.state().positions_interleaved(),
            velocities: solver.state().velocities_interleaved(),
            surface_indices: mesh.surface_indices.clone(),
            metrics: SimulationMetrics {
                frames,
                total_wall_time: total_wall,
                avg_step_time: total_wall / frames as f64,
                final_kinetic_energy: final_ke,
            },
        };
        std::fs::write(path, toml::to_string(&out)?)?;
        println!("Final state written to: {path}");
    }

    Ok(())
}

/// Validate a mesh file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_tet_mesh(path)?;

    let input = SimulationInput {
        pinned: vec![false; mesh.vertex_count()],
        params: SimulationParams::default(),
        mesh,
    };
    squish_io::validator::validate_input(&input)?;
    let mesh = input.mesh;

    println!("OK: {path}");
    println!("  Vertices:          {}", mesh.vertex_count());
    println!("  Tetrahedra:        {}", mesh.tet_count());
    println!("  Edges:             {}", mesh.edge_count());
    println!("  Surface triangles: {}", mesh.surface_triangle_count());

    Ok(())
}

/// Inspect constraint and cluster statistics for a mesh.
pub fn info(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_tet_mesh(path)?;
    let solver = XpbdSolver::from_mesh(&mesh, SolverConfig::default())?;

    println!("Mesh: {path}");
    println!("  Particles:       {}", mesh.vertex_count());
    println!(
        "  Constraints:     {} edge, {} volume ({} degenerate tets)",
        solver.constraints().lengths.len(),
        solver.constraints().volumes.len(),
        solver.constraints().degenerate_tets,
    );

    for (label, clusters) in [
        ("Edge clusters", solver.edge_clusters()),
        ("Volume clusters", solver.volume_clusters()),
    ] {
        let sizes: Vec<usize> = clusters.clusters().map(<[u32]>::len).collect();
        let largest = sizes.iter().max().copied().unwrap_or(0);
        let smallest = sizes.iter().min().copied().unwrap_or(0);
        println!(
            "  {label}: {} (sizes {} – {})",
            clusters.cluster_count(),
            smallest,
            largest,
        );
    }

    Ok(())
}
