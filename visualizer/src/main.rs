use iced::{
    alignment, mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, mouse_area, row, scrollable, text, Column, Container, Row,
    },
    Alignment, Color, Element, Length, Pixels, Point, Rectangle, Renderer, Size, Subscription,
    Task, Theme,
};
use radarcore::radar::{
    range_rings, TooltipContent, TooltipLayout, DEFAULT_HIT_THRESHOLD_PX, DEFAULT_RING_COUNT,
};
use radarcore::telemetry::LogManager;
use radarcore::tracking::retain_selection;
use radarcore::{
    find_nearest_point, recompute, GeoPosition, ProjectedPoint, RadarConfig, RadarFrame,
    RadarResult, RadarScope, ScreenPoint, SignalTier, TrackedEntity,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CANVAS_SIZE: f64 = 450.0;
const CANVAS_MARGIN: f64 = 20.0;
const RANGE_CHOICES: [u32; 5] = [10, 25, 50, 100, 250];
const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:9100";
const TOOLTIP_GLYPH_PX: f64 = 7.0;
const TOOLTIP_LINE_PX: f32 = 14.0;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Proximity Radar".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

fn bridge_url(route: &str) -> String {
    let base = std::env::var("RADAR_BRIDGE_URL").unwrap_or_else(|_| DEFAULT_BRIDGE_URL.into());
    format!("{}/{}", base.trim_end_matches('/'), route)
}

fn scope() -> RadarResult<RadarScope> {
    RadarScope::for_canvas(CANVAS_SIZE, CANVAS_MARGIN)
}

#[derive(Debug)]
struct Visualizer {
    snapshot: Option<SnapshotPayload>,
    /// Range picked in this window; falls back to the host's range.
    range_m: Option<f64>,
    frame: RadarFrame,
    highlighted: Option<String>,
    status: String,
    history: Vec<String>,
    logger: LogManager,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    SnapshotFetched(Result<SnapshotPayload, String>),
    RangeSelected(u32),
    RangePosted(Result<String, String>),
    RowHovered(String),
    RowLeft,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                snapshot: None,
                range_m: None,
                frame: RadarFrame::default(),
                highlighted: None,
                status: "Waiting for radar host...".into(),
                history: Vec::new(),
                logger: LogManager::new("visualizer"),
            },
            Task::perform(fetch_snapshot(), Message::SnapshotFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_snapshot(), Message::SnapshotFetched),
            Message::SnapshotFetched(Ok(snapshot)) => {
                state.highlighted =
                    retain_selection(state.highlighted.as_deref(), &snapshot.entities);
                state.snapshot = Some(snapshot);
                state.refresh_frame();
                Task::none()
            }
            Message::SnapshotFetched(Err(err)) => {
                state.status = format!("Host unreachable: {err}");
                Task::none()
            }
            Message::RangeSelected(range) => {
                let range_m = f64::from(range);
                state.range_m = Some(range_m);
                state.refresh_frame();
                state.push_history(format!("Range set to {range} m"));
                Task::perform(post_range(range_m), Message::RangePosted)
            }
            Message::RangePosted(Ok(message)) => {
                state.push_history(message);
                Task::none()
            }
            Message::RangePosted(Err(err)) => {
                state.status = format!("Range update failed: {err}");
                Task::none()
            }
            Message::RowHovered(id) => {
                state.highlighted = Some(id);
                Task::none()
            }
            Message::RowLeft => {
                state.highlighted = None;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let range_m = state.effective_range();

        let range_buttons = RANGE_CHOICES.iter().fold(Row::new().spacing(6), |row, &choice| {
            row.push(
                button(text(format!("{choice}m")).size(12))
                    .on_press(Message::RangeSelected(choice))
                    .padding(6),
            )
        });

        let fix_line = match state.frame.observer {
            Some(observer) => text(format!(
                "Lat: {:.6}  Lon: {:.6}",
                observer.latitude(),
                observer.longitude()
            ))
            .color(Color::from_rgb(0.16, 0.65, 0.27)),
            None => text("Lat: No fix  Lon: No fix").color(Color::from_rgb(0.86, 0.21, 0.27)),
        };

        let scope_panel: Element<'_, Message> = match scope() {
            Ok(scope) => Canvas::new(ScopeView {
                frame: state.frame.clone(),
                entities: state
                    .snapshot
                    .as_ref()
                    .map(|snapshot| snapshot.entities.clone())
                    .unwrap_or_default(),
                scope,
                range_m,
                highlighted: state.highlighted.clone(),
            })
            .width(Length::Fixed(CANVAS_SIZE as f32))
            .height(Length::Fixed(CANVAS_SIZE as f32))
            .into(),
            Err(err) => text(format!("Scope unavailable: {err}")).into(),
        };

        let radar_column = column![
            text("Radar").size(26),
            fix_line.size(14),
            range_buttons,
            scope_panel,
            text(&state.status).size(14),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(CANVAS_SIZE as f32 + 40.0));

        let rows = state.frame.ranked_within_range().fold(
            Column::new().spacing(4),
            |col, entry| {
                let marker = if state.highlighted.as_deref() == Some(entry.entity_id.as_str()) {
                    ">"
                } else {
                    " "
                };
                let line = row![
                    text(marker).size(12).width(Length::Fixed(12.0)),
                    text(entry.display_name.clone().unwrap_or_else(|| "HIDDEN".into()))
                        .size(12)
                        .width(Length::Fixed(160.0)),
                    text(entry.entity_id.clone()).size(12).width(Length::Fixed(140.0)),
                    text(format!("{} dBm", entry.signal_strength))
                        .size(12)
                        .color(tier_color(entry.signal_tier()))
                        .width(Length::Fixed(70.0)),
                    text(format!("{:.1}m", entry.distance_m)).size(12),
                ]
                .spacing(8);
                col.push(
                    mouse_area(line)
                        .on_enter(Message::RowHovered(entry.entity_id.clone()))
                        .on_exit(Message::RowLeft),
                )
            },
        );
        let device_table = if state.frame.ranked_within_range().next().is_none() {
            Column::new().push(text("No devices in range").size(12))
        } else {
            rows
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let table_column = column![
            text("Nearby devices").size(26),
            text(format!(
                "{} plotted / {} tracked within {:.0} m",
                state.frame.points.len(),
                state.frame.ranked.len(),
                range_m
            ))
            .size(14),
            Container::new(scrollable(device_table).height(Length::Fixed(360.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![radar_column, table_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn effective_range(&self) -> f64 {
        self.range_m
            .or_else(|| self.snapshot.as_ref().map(|snapshot| snapshot.max_range_m))
            .unwrap_or(f64::from(RANGE_CHOICES[0]))
    }

    fn refresh_frame(&mut self) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        let range_m = self.effective_range();
        match build_frame(snapshot, range_m) {
            Ok(frame) => {
                self.logger.record_frame(&frame, range_m);
                self.status = if frame.has_fix() {
                    snapshot.status.clone()
                } else {
                    "No GPS fix: radar idle".into()
                };
                self.frame = frame;
            }
            Err(err) => self.status = format!("Cannot draw radar: {err}"),
        }
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

fn build_frame(snapshot: &SnapshotPayload, range_m: f64) -> RadarResult<RadarFrame> {
    let config = RadarConfig::new(range_m, snapshot.observer)?;
    Ok(recompute(&snapshot.entities, &config, &scope()?))
}

/// Ring labels sit on a baseline 10 px inside the top of each ring.
fn ring_label_position(center: Point, ring_radius: f32) -> Point {
    Point::new(center.x + 5.0, center.y - ring_radius + 10.0)
}

fn grid_stroke() -> Stroke<'static> {
    Stroke::default()
        .with_color(Color::from_rgba(0.0, 0.0, 0.0, 0.4))
        .with_width(1.5)
}

fn tier_color(tier: SignalTier) -> Color {
    match tier {
        SignalTier::High => Color::from_rgb(0.0, 0.6, 0.0),
        SignalTier::Medium => Color::from_rgb(0.85, 0.55, 0.0),
        SignalTier::Low => Color::from_rgb(0.8, 0.1, 0.1),
    }
}

async fn fetch_snapshot() -> Result<SnapshotPayload, String> {
    let response = reqwest::get(bridge_url("snapshot"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<SnapshotPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_range(max_range_m: f64) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(bridge_url("range"))
        .json(&RangeUpdate { max_range_m })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok(format!("Host range now {max_range_m:.0} m"))
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Serialize)]
struct RangeUpdate {
    max_range_m: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SnapshotPayload {
    #[serde(default)]
    observer: Option<GeoPosition>,
    #[serde(default)]
    entities: Vec<TrackedEntity>,
    #[serde(default = "default_range_m")]
    max_range_m: f64,
    #[serde(default)]
    status: String,
}

fn default_range_m() -> f64 {
    f64::from(RANGE_CHOICES[0])
}

#[derive(Clone)]
struct ScopeView {
    frame: RadarFrame,
    entities: Vec<TrackedEntity>,
    scope: RadarScope,
    range_m: f64,
    highlighted: Option<String>,
}

impl ScopeView {
    fn hovered(&self, bounds: Rectangle, cursor: mouse::Cursor) -> Option<&str> {
        let position = cursor.position_in(bounds)?;
        find_nearest_point(
            &self.frame.points,
            ScreenPoint::new(f64::from(position.x), f64::from(position.y)),
            DEFAULT_HIT_THRESHOLD_PX,
        )
    }

    fn draw_tooltip(&self, frame: &mut Frame, point: &ProjectedPoint, entity: &TrackedEntity) {
        let content = TooltipContent::for_entity(entity);
        let width = content.widest_line() as f64 * TOOLTIP_GLYPH_PX + 20.0;
        let height = f64::from(TOOLTIP_LINE_PX) * 3.0 + 15.0;
        let layout = TooltipLayout::place(
            ScreenPoint::new(point.screen_x, point.screen_y),
            width,
            height,
            CANVAS_SIZE,
        );

        let origin = Point::new(layout.origin.x as f32, layout.origin.y as f32);
        let size = Size::new(layout.width as f32, layout.height as f32);
        frame.fill_rectangle(
            Point::new(origin.x + 4.0, origin.y + 4.0),
            size,
            Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        );
        frame.fill_rectangle(origin, size, Color::WHITE);
        frame.stroke(
            &Path::rectangle(origin, size),
            Stroke::default().with_color(Color::BLACK).with_width(3.0),
        );

        let colors = [
            Color::BLACK,
            Color::from_rgb(0.0, 0.6, 0.0),
            Color::from_rgb(0.4, 0.4, 0.4),
        ];
        for (index, (line, color)) in content.lines().iter().zip(colors).enumerate() {
            frame.fill_text(canvas::Text {
                content: (*line).to_string(),
                position: Point::new(
                    origin.x + 10.0,
                    origin.y + 10.0 + TOOLTIP_LINE_PX * index as f32,
                ),
                color,
                size: Pixels(10.0),
                ..canvas::Text::default()
            });
        }
    }
}

impl canvas::Program<Message> for ScopeView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let center = Point::new(self.scope.center.x as f32, self.scope.center.y as f32);
        let radius = self.scope.radius_px as f32;
        for ring in range_rings(self.range_m, &self.scope, DEFAULT_RING_COUNT) {
            let ring_radius = ring.radius_px as f32;
            frame.stroke(&Path::circle(center, ring_radius), grid_stroke());
            frame.fill_text(canvas::Text {
                content: ring.label,
                position: ring_label_position(center, ring_radius),
                color: Color::from_rgb(0.4, 0.4, 0.4),
                size: Pixels(10.0),
                align_y: alignment::Vertical::Bottom,
                ..canvas::Text::default()
            });
        }

        let axes = Path::new(|builder| {
            builder.move_to(Point::new(center.x, center.y - radius));
            builder.line_to(Point::new(center.x, center.y + radius));
            builder.move_to(Point::new(center.x - radius, center.y));
            builder.line_to(Point::new(center.x + radius, center.y));
        });
        frame.stroke(&axes, grid_stroke());
        frame.fill(&Path::circle(center, 6.0), Color::from_rgb(0.0, 0.0, 1.0));

        let active = self
            .hovered(bounds, cursor)
            .or(self.highlighted.as_deref());

        for point in &self.frame.points {
            let color = if active == Some(point.entity_id.as_str()) {
                Color::from_rgb(1.0, 0.6, 0.0)
            } else {
                Color::from_rgb(1.0, 0.0, 0.0)
            };
            let marker = Point::new(point.screen_x as f32, point.screen_y as f32);
            frame.fill(&Path::circle(marker, 5.0), color);
        }

        if let Some(id) = active {
            let point = self.frame.point(id);
            let entity = self.entities.iter().find(|entity| entity.id == id);
            if let (Some(point), Some(entity)) = (point, entity) {
                self.draw_tooltip(&mut frame, point, entity);
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.hovered(bounds, cursor).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(observer: Option<GeoPosition>) -> SnapshotPayload {
        let origin = GeoPosition::new(3.1390, 101.6869);
        SnapshotPayload {
            observer,
            entities: vec![
                TrackedEntity::new("A", origin, -40),
                TrackedEntity::new("B", origin.offset_by(0.0, 20.0), -75),
            ],
            max_range_m: 10.0,
            status: "ok".into(),
        }
    }

    #[test]
    fn frame_uses_selected_range() {
        let payload = snapshot(Some(GeoPosition::new(3.1390, 101.6869)));
        assert_eq!(build_frame(&payload, 10.0).unwrap().points.len(), 1);
        assert_eq!(build_frame(&payload, 25.0).unwrap().points.len(), 2);
    }

    #[test]
    fn frame_without_fix_is_empty() {
        let frame = build_frame(&snapshot(None), 10.0).unwrap();
        assert!(!frame.has_fix());
        assert!(frame.ranked.is_empty());
    }

    #[test]
    fn ring_labels_hang_inside_their_ring() {
        let label = ring_label_position(Point::new(225.0, 225.0), 41.0);
        assert_eq!(label, Point::new(230.0, 194.0));
    }

    #[test]
    fn snapshot_payload_tolerates_missing_fields() {
        let payload: SnapshotPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.observer.is_none());
        assert!(payload.entities.is_empty());
        assert_eq!(payload.max_range_m, f64::from(RANGE_CHOICES[0]));
        assert!(build_frame(&payload, payload.max_range_m).is_ok());
    }
}
