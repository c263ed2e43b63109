//! Headless sketch session.
//!
//! Replays a scripted sequence of clicks through the editor, then prints the
//! solved vortex strengths and a coarse grid of flow velocities.
//!
//! ```text
//! cargo run --example sketch
//! RUST_LOG=panelflow=debug cargo run --example sketch
//! ```

use panelflow::editor::{Editor, EditorParams, PointerButton};
use panelflow::math::{Point3, Viewport};

fn main() -> panelflow::Result<()> {
    // Default: WARN for everything, INFO for panelflow.
    // Override with RUST_LOG env var (e.g. RUST_LOG=panelflow=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("panelflow=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut editor = Editor::new(EditorParams::default(), Viewport::new(600.0, 600.0))?;

    // Thin wedge, trailing edge on the right between the first and last panel.
    let clicks = [
        (480.0, 300.0),
        (300.0, 270.0),
        (150.0, 300.0),
        (300.0, 320.0),
        (482.0, 301.0),
    ];
    for (x, y) in clicks {
        editor.on_pointer_down(x, y, PointerButton::Primary);
        editor.on_pointer_move(x + 5.0, y + 5.0);
    }

    let Some(flow) = editor.flow() else {
        println!("no polygon closed");
        return Ok(());
    };

    println!("panels: {}", flow.panel_count());
    for (i, gamma) in flow.strengths().iter().enumerate() {
        println!("  gamma[{i}] = {gamma:+.6}");
    }
    println!("kutta residual: {:.3e}", flow.kutta_residual());
    println!(
        "signed area: {:+.4} (normals outward: {})",
        flow.signed_area(),
        flow.normals_point_outward()
    );

    println!("velocity field:");
    for row in 0..5 {
        let y = 0.8 - 0.4 * f64::from(row);
        let line: Vec<String> = (0..5)
            .map(|col| {
                let x = -0.8 + 0.4 * f64::from(col);
                let v = flow.velocity_at(&Point3::new(x, y, 0.0));
                format!("({:+.2},{:+.2})", v.x, v.y)
            })
            .collect();
        println!("  {}", line.join(" "));
    }

    Ok(())
}
