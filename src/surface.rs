//! Drawing seam. The game only ever issues these four calls and never reads
//! anything back, so a canvas and an in-memory recorder are interchangeable.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Edges touching counts as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

pub trait Surface {
    fn clear(&mut self, region: Rect);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: String },
    Circle { cx: f64, cy: f64, r: f64, color: String },
    Text { text: String, x: f64, y: f64, font: String, color: String },
}

impl DrawCommand {
    /// Area the command paints. Text has no measured extent, so it is just
    /// its anchor point.
    fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. } => *rect,
            DrawCommand::Circle { cx, cy, r, .. } => Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            DrawCommand::Text { x, y, .. } => Rect::new(*x, *y, 0.0, 0.0),
        }
    }
}

/// Headless surface: keeps whatever is currently "on screen" as a list of
/// draw commands. Clearing drops every command whose shape overlaps the region.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn circles(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Circle { .. })).count()
    }

    pub fn rects(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Rect { .. })).count()
    }

    pub fn texts(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Text { .. })).count()
    }

    /// Text of the last `fill_text` still on screen.
    pub fn last_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, region: Rect) {
        self.clears += 1;
        self.commands.retain(|c| !c.bounds().intersects(&region));
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::Rect { rect, color: color.to_string() });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.commands.push(DrawCommand::Circle { cx, cy, r, color: color.to_string() });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_twice_matches_clear_once() {
        let full = Rect::new(0.0, 0.0, 600.0, 400.0);
        let mut once = RecordingSurface::new();
        let mut twice = RecordingSurface::new();
        for s in [&mut once, &mut twice] {
            s.fill_rect(Rect::new(260.0, 370.0, 80.0, 20.0), "blue");
            s.fill_circle(100.0, 50.0, 20.0, "red");
        }
        once.clear(full);
        twice.clear(full);
        twice.clear(full);
        assert_eq!(once.commands(), twice.commands());
        assert!(twice.commands().is_empty());
    }

    #[test]
    fn partial_clear_keeps_outside_commands() {
        let mut s = RecordingSurface::new();
        s.fill_circle(10.0, 10.0, 5.0, "red");
        s.fill_circle(500.0, 300.0, 5.0, "red");
        s.clear(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(s.circles(), 1);
        assert_eq!(s.clear_count(), 1);
    }

    #[test]
    fn clear_removes_shapes_crossing_the_region_edge() {
        let mut s = RecordingSurface::new();
        // centre below the bottom edge, upper half still on screen
        s.fill_circle(50.0, 401.0, 20.0, "red");
        // rect hanging off the left edge
        s.fill_rect(Rect::new(-30.0, 100.0, 40.0, 10.0), "blue");
        // entirely off screen
        s.fill_circle(50.0, 450.0, 20.0, "red");
        s.clear(Rect::new(0.0, 0.0, 600.0, 400.0));
        assert_eq!(s.rects(), 0);
        assert_eq!(
            s.commands(),
            &[DrawCommand::Circle { cx: 50.0, cy: 450.0, r: 20.0, color: "red".into() }]
        );
    }

    #[test]
    fn intersects_includes_touching_edges() {
        let field = Rect::new(0.0, 0.0, 600.0, 400.0);
        assert!(field.intersects(&Rect::new(0.0, 0.0, 0.0, 0.0)));
        assert!(field.intersects(&Rect::new(600.0, 400.0, 5.0, 5.0)));
        assert!(!field.intersects(&Rect::new(601.0, 10.0, 5.0, 5.0)));
        assert!(!field.intersects(&Rect::new(10.0, -20.0, 5.0, 5.0)));
    }
}
