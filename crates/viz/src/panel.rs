//! Side panel: level buttons, axis steppers and the description text.
//!
//! Input systems only send [`ViewerMessage`]s. Everything the panel shows is
//! written back from [`ViewUpdated`] events after dispatch.

use bevy::prelude::*;
use selection::{capitalize_first, AppMessage, Axis, Description, ViewUpdate};

use crate::plugin::ViewerSet;
use crate::state_loader::{ViewUpdated, ViewerMessage, ViewerState};

/// Plugin for the selection panel.
pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_panel)
            .add_systems(
                Update,
                (
                    handle_level_buttons,
                    handle_step_buttons,
                    handle_track_buttons,
                    handle_keyboard,
                )
                    .in_set(ViewerSet::Input),
            )
            .add_systems(
                Update,
                (
                    populate_level_buttons,
                    rebuild_value_tracks,
                    apply_view,
                    show_load_failure,
                    update_button_colors,
                )
                    .chain()
                    .in_set(ViewerSet::Apply),
            );
    }
}

/// Shown until the dataset arrives.
pub const LOADING_TEXT: &str = "Loading…";

/// Shown when the dataset could not be loaded.
pub const FAILED_TEXT: &str = "Failed to load dataset";

const PANEL_WIDTH: f32 = 360.0;
const PANEL_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.92);
const TEXT_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);
const ERROR_COLOR: Color = Color::srgb(0.8, 0.1, 0.1);
const BUTTON_IDLE: Color = Color::srgb(0.85, 0.85, 0.85);
const BUTTON_HOVERED: Color = Color::srgb(0.75, 0.75, 0.75);
const BUTTON_PRESSED: Color = Color::srgb(0.6, 0.6, 0.6);
const BUTTON_ACTIVE: Color = Color::srgb(1.0, 0.45, 0.25);

/// Marker for the panel container; the camera ignores the mouse over it.
#[derive(Component)]
pub struct PanelRoot;

/// Container the level buttons are spawned into.
#[derive(Component)]
pub struct LevelButtonRow;

/// Button selecting a level by name.
#[derive(Component, Debug, Clone)]
pub struct LevelButton(pub String);

/// Button moving one axis by a number of steps.
#[derive(Component, Debug, Clone, Copy)]
pub struct StepButton {
    pub axis: Axis,
    pub delta: i32,
}

/// Row of buttons, one per slider position of an axis.
#[derive(Component, Debug)]
pub struct ValueTrack {
    pub axis: Axis,
    /// Number of buttons currently spawned.
    pub len: u32,
}

/// Button setting an axis to an absolute 1-based value.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrackButton {
    pub axis: Axis,
    pub value: u32,
}

/// Text showing an axis label.
#[derive(Component)]
pub struct AxisLabelText(pub Axis);

/// Text showing an axis value as `v / N`.
#[derive(Component)]
pub struct AxisValueText(pub Axis);

/// Text showing the description of the current point.
#[derive(Component)]
pub struct DescriptionText;

/// Axis step bound to a key: `Q`/`A` for X, `W`/`S` for Y, `E`/`D` for Z.
pub fn step_for_key(key: KeyCode) -> Option<(Axis, i32)> {
    match key {
        KeyCode::KeyQ => Some((Axis::X, 1)),
        KeyCode::KeyA => Some((Axis::X, -1)),
        KeyCode::KeyW => Some((Axis::Y, 1)),
        KeyCode::KeyS => Some((Axis::Y, -1)),
        KeyCode::KeyE => Some((Axis::Z, 1)),
        KeyCode::KeyD => Some((Axis::Z, -1)),
        _ => None,
    }
}

/// Zero-based level index for the digit keys `1` to `9`.
pub fn digit_index(key: KeyCode) -> Option<usize> {
    let index = match key {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    };
    Some(index)
}

/// Slider readout, e.g. `2 / 5`.
pub fn value_text(value: u32, len: u32) -> String {
    format!("{} / {}", value, len)
}

/// Description split into heading, summary and example sections.
pub fn description_sections(description: &Description) -> [String; 3] {
    [
        format!("{} ", description.heading()),
        description.summary(),
        format!("\nExample: {}", description.example),
    ]
}

/// Background for a panel button.
pub fn button_color(active: bool, interaction: Interaction) -> Color {
    match (active, interaction) {
        (_, Interaction::Pressed) => BUTTON_PRESSED,
        (true, _) => BUTTON_ACTIVE,
        (false, Interaction::Hovered) => BUTTON_HOVERED,
        (false, Interaction::None) => BUTTON_IDLE,
    }
}

fn text_style(font_size: f32) -> TextStyle {
    TextStyle {
        font_size,
        color: TEXT_COLOR,
        ..default()
    }
}

/// System to spawn the panel.
fn setup_panel(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(10.0),
                    right: Val::Px(10.0),
                    width: Val::Px(PANEL_WIDTH),
                    padding: UiRect::all(Val::Px(12.0)),
                    row_gap: Val::Px(10.0),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                background_color: PANEL_BACKGROUND.into(),
                ..default()
            },
            Interaction::default(),
            PanelRoot,
        ))
        .with_children(|panel| {
            panel.spawn((
                NodeBundle {
                    style: Style {
                        flex_direction: FlexDirection::Row,
                        flex_wrap: FlexWrap::Wrap,
                        column_gap: Val::Px(6.0),
                        row_gap: Val::Px(6.0),
                        ..default()
                    },
                    ..default()
                },
                LevelButtonRow,
            ));

            for axis in Axis::ALL {
                spawn_axis_row(panel, axis);
            }

            panel.spawn((
                TextBundle::from_sections([
                    TextSection::new(LOADING_TEXT, text_style(16.0)),
                    TextSection::new("", text_style(14.0)),
                    TextSection::new("", text_style(13.0)),
                ]),
                DescriptionText,
            ));
        });
}

fn spawn_axis_row(panel: &mut ChildBuilder, axis: Axis) {
    panel
        .spawn(NodeBundle {
            style: Style {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                TextBundle::from_section(axis.as_str(), text_style(14.0)),
                AxisLabelText(axis),
            ));

            row.spawn(NodeBundle {
                style: Style {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                },
                ..default()
            })
            .with_children(|stepper| {
                spawn_step_button(stepper, axis, -1);
                stepper.spawn((
                    TextBundle::from_section("", text_style(14.0)).with_style(Style {
                        min_width: Val::Px(48.0),
                        ..default()
                    }),
                    AxisValueText(axis),
                ));
                spawn_step_button(stepper, axis, 1);
            });

            row.spawn((
                NodeBundle {
                    style: Style {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(4.0),
                        ..default()
                    },
                    ..default()
                },
                ValueTrack { axis, len: 0 },
            ));
        });
}

fn spawn_track_button(parent: &mut ChildBuilder, axis: Axis, value: u32) {
    parent
        .spawn((
            ButtonBundle {
                style: Style {
                    width: Val::Px(22.0),
                    height: Val::Px(22.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: BUTTON_IDLE.into(),
                ..default()
            },
            TrackButton { axis, value },
        ))
        .with_children(|button| {
            button.spawn(TextBundle::from_section(value.to_string(), text_style(12.0)));
        });
}

fn spawn_step_button(parent: &mut ChildBuilder, axis: Axis, delta: i32) {
    let label = if delta < 0 { "-" } else { "+" };
    parent
        .spawn((
            ButtonBundle {
                style: Style {
                    width: Val::Px(28.0),
                    height: Val::Px(28.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: BUTTON_IDLE.into(),
                ..default()
            },
            StepButton { axis, delta },
        ))
        .with_children(|button| {
            button.spawn(TextBundle::from_section(label, text_style(16.0)));
        });
}

fn spawn_level_button(parent: &mut ChildBuilder, level: &str) {
    parent
        .spawn((
            ButtonBundle {
                style: Style {
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                background_color: BUTTON_IDLE.into(),
                ..default()
            },
            LevelButton(level.to_string()),
        ))
        .with_children(|button| {
            button.spawn(TextBundle::from_section(
                capitalize_first(level),
                text_style(14.0),
            ));
        });
}

/// System to turn level button presses into messages.
fn handle_level_buttons(
    buttons: Query<(&Interaction, &LevelButton), Changed<Interaction>>,
    mut messages: EventWriter<ViewerMessage>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            messages.send(ViewerMessage(AppMessage::LevelSelected(button.0.clone())));
        }
    }
}

/// System to turn stepper presses into messages.
fn handle_step_buttons(
    buttons: Query<(&Interaction, &StepButton), Changed<Interaction>>,
    mut messages: EventWriter<ViewerMessage>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            messages.send(ViewerMessage(AppMessage::AxisStepped(
                button.axis,
                button.delta,
            )));
        }
    }
}

/// System to turn track presses into absolute slider values.
fn handle_track_buttons(
    buttons: Query<(&Interaction, &TrackButton), Changed<Interaction>>,
    mut messages: EventWriter<ViewerMessage>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            messages.send(ViewerMessage(AppMessage::AxisChanged(
                button.axis,
                button.value,
            )));
        }
    }
}

/// System to handle the stepping and level keys.
fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<ViewerState>,
    mut messages: EventWriter<ViewerMessage>,
) {
    for key in keyboard.get_just_pressed() {
        if let Some((axis, delta)) = step_for_key(*key) {
            messages.send(ViewerMessage(AppMessage::AxisStepped(axis, delta)));
        } else if let Some(index) = digit_index(*key) {
            if let Some(level) = state.level_names().into_iter().nth(index) {
                messages.send(ViewerMessage(AppMessage::LevelSelected(level)));
            }
        }
    }
}

/// System to spawn one button per level once the dataset is known.
fn populate_level_buttons(
    mut commands: Commands,
    state: Res<ViewerState>,
    rows: Query<Entity, With<LevelButtonRow>>,
    mut populated: Local<bool>,
) {
    if *populated {
        return;
    }
    let levels = state.level_names();
    if levels.is_empty() {
        return;
    }

    for row in rows.iter() {
        commands.entity(row).with_children(|row| {
            for level in &levels {
                spawn_level_button(row, level);
            }
        });
    }
    *populated = true;
}

/// System to respawn a track's buttons when its axis length changes.
fn rebuild_value_tracks(
    mut commands: Commands,
    mut updates: EventReader<ViewUpdated>,
    mut tracks: Query<(Entity, &mut ValueTrack)>,
) {
    let Some(ViewUpdated(view)) = updates.read().last() else {
        return;
    };

    for (entity, mut track) in tracks.iter_mut() {
        let axis = track.axis;
        let len = view.axis_len(axis);
        if track.len == len {
            continue;
        }
        track.len = len;

        commands
            .entity(entity)
            .despawn_descendants()
            .with_children(|track| {
                for value in 1..=len {
                    spawn_track_button(track, axis, value);
                }
            });
    }
}

/// System to write the latest view into the panel texts.
#[allow(clippy::type_complexity)]
fn apply_view(
    mut updates: EventReader<ViewUpdated>,
    mut labels: Query<(&AxisLabelText, &mut Text), (Without<AxisValueText>, Without<DescriptionText>)>,
    mut values: Query<(&AxisValueText, &mut Text), (Without<AxisLabelText>, Without<DescriptionText>)>,
    mut description: Query<
        &mut Text,
        (
            With<DescriptionText>,
            Without<AxisLabelText>,
            Without<AxisValueText>,
        ),
    >,
) {
    let Some(ViewUpdated(view)) = updates.read().last() else {
        return;
    };

    for (AxisLabelText(axis), mut text) in labels.iter_mut() {
        text.sections[0].value = view.labels.get(*axis).to_string();
    }

    for (AxisValueText(axis), mut text) in values.iter_mut() {
        text.sections[0].value = value_text(view.position.get(*axis), view.axis_len(*axis));
    }

    for mut text in description.iter_mut() {
        write_description(&mut text, view);
    }
}

fn write_description(text: &mut Text, view: &ViewUpdate) {
    for (section, value) in text
        .sections
        .iter_mut()
        .zip(description_sections(&view.description))
    {
        section.value = value;
        section.style.color = TEXT_COLOR;
    }
}

/// System to replace the description with the failure line.
fn show_load_failure(
    state: Res<ViewerState>,
    mut description: Query<&mut Text, With<DescriptionText>>,
) {
    if !state.is_changed() || state.app.failure().is_none() {
        return;
    }

    for mut text in description.iter_mut() {
        for (i, section) in text.sections.iter_mut().enumerate() {
            section.value = if i == 0 {
                FAILED_TEXT.to_string()
            } else {
                String::new()
            };
            section.style.color = ERROR_COLOR;
        }
    }
}

/// System to color buttons by hover state and the active level.
fn update_button_colors(
    state: Res<ViewerState>,
    mut levels: Query<(&LevelButton, &Interaction, &mut BackgroundColor)>,
    mut steps: Query<
        (&Interaction, &mut BackgroundColor),
        (With<StepButton>, Without<LevelButton>, Without<TrackButton>),
    >,
    mut tracks: Query<
        (&TrackButton, &Interaction, &mut BackgroundColor),
        (Without<LevelButton>, Without<StepButton>),
    >,
) {
    let current = state.current_level();
    let selection = state.app.selection();

    for (LevelButton(level), interaction, mut background) in levels.iter_mut() {
        let active = current == Some(level.as_str());
        *background = button_color(active, *interaction).into();
    }

    for (interaction, mut background) in steps.iter_mut() {
        *background = button_color(false, *interaction).into();
    }

    for (button, interaction, mut background) in tracks.iter_mut() {
        let active = selection.map(|s| s.value(button.axis)) == Some(button.value);
        *background = button_color(active, *interaction).into();
    }
}
