use macroquad::prelude::*;
use tiled_compositor::{AnimationPlayer, DrawOptions, MacroquadBackend, MapRenderer, Project, SystemClock};

fn window_conf() -> Conf {
    Conf {
        window_title: "Render Project".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("render_project: {e:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let manifest = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/project.json".to_owned());
    let project = Project::load(&manifest)?;

    let mut backend = MacroquadBackend::default();
    backend.load_catalog(&project.catalog).await?;

    let mut renderer = MapRenderer::new();
    let clock = SystemClock::new();

    // first action of every class, lined up along the bottom of the window
    let mut players = Vec::new();
    let mut classes: Vec<_> = project.animations.classes().collect();
    classes.sort_unstable();
    for class in classes {
        if let Some(action) = project.animations.actions(class).next() {
            players.push(AnimationPlayer::from_registry(
                &project.animations,
                &project.catalog,
                class,
                action,
            )?);
        }
    }

    let maps: Vec<String> = std::env::args().skip(2).collect();

    loop {
        clear_background(BLACK);

        for name in &maps {
            let map = project.maps.get(name)?;
            renderer.draw_map(map, &project.catalog, &DrawOptions::at(0.0, 0.0), &mut backend)?;
        }

        for (i, player) in players.iter_mut().enumerate() {
            let opts = DrawOptions::at(32.0 + i as f32 * 48.0, screen_height() - 64.0);
            player.draw(&opts, &clock, &mut backend)?;
        }

        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            55.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}
