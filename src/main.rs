mod bosses;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod enemies;
mod hazards;
mod physics;
mod player;
mod render;
mod run;
mod ui;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Cube Runner".to_string(),
            resolution: (800, 450).into(),
            resizable: false,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        run::RunPlugin,
        render::RenderPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
