// src/debug/visualization/svg.rs
use crate::math::{
    algorithms::IsoLine,
    error::{MathError, MathResult},
    types::*,
    utils::{comparison, constants::EPSILON},
};
use crate::physics::electrostatics::{
    ChargeSet, ChargeSign, FieldEvaluation, FieldLine, InteractionVector,
};
use bevy::log::info;
use std::path::Path as FsPath;
use svg::{Document, Node};
use svg::node::element::{
    Circle, Definitions, Group, Line, Marker, Path, Rectangle, Text, path::Data,
};

// ===================================================================================
// 1. STIL-KONFIGURATION
// ===================================================================================
/// Darstellungsoptionen für den Ladungsplot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Breite der Leinwand in Pixeln
    pub width: f64,
    /// Höhe eines Panels in Pixeln (zwei Panels übereinander)
    pub panel_height: f64,
    /// Innenabstand um die Plotfläche
    pub padding: f64,
    pub charge_radius: f64,
    /// Länge der Quiver-Pfeile relativ zur kleinsten Zellgröße
    pub quiver_scale: f64,
    pub positive_color: String,
    pub negative_color: String,
    pub neutral_color: String,
}

impl PlotStyle {
    pub fn validate(&self) -> MathResult<()> {
        if self.width <= 2.0 * self.padding || self.panel_height <= 2.0 * self.padding {
            return Err(MathError::InvalidConfiguration {
                message: "Plot size must exceed twice the padding".to_string(),
            });
        }
        if !(self.quiver_scale > 0.0 && self.charge_radius > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: "Quiver scale and charge radius must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn charge_color(&self, sign: ChargeSign) -> &str {
        match sign {
            ChargeSign::Positive => &self.positive_color,
            ChargeSign::Negative => &self.negative_color,
            ChargeSign::Neutral => &self.neutral_color,
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800.0,
            panel_height: 400.0,
            padding: 60.0,
            charge_radius: 8.0,
            quiver_scale: 0.8,
            positive_color: "#d62728".to_string(),
            negative_color: "#1f77b4".to_string(),
            neutral_color: "#7f7f7f".to_string(),
        }
    }
}

/// Farbe eines Konturniveaus, linear zwischen den Enden der Viridis-Skala.
fn level_color(t: f64) -> String {
    const LOW: [f64; 3] = [68.0, 1.0, 84.0];
    const HIGH: [f64; 3] = [253.0, 231.0, 37.0];
    let t = t.clamp(0.0, 1.0);
    let [r, g, b] = [0, 1, 2].map(|i| comparison::lerp(LOW[i], HIGH[i], t).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

// ===================================================================================
// 2. PANEL-HELFER
// ===================================================================================
/// Ein Panel: bildet Weltkoordinaten auf einen Pixelbereich ab (y nach oben).
struct Panel {
    bounds: Bounds2D,
    origin_px: DVec2,
    size_px: DVec2,
    group: Group,
}

impl Panel {
    fn new(bounds: Bounds2D, top: f64, style: &PlotStyle, title: &str) -> Self {
        let origin_px = DVec2::new(style.padding, top + style.padding);
        let size_px = DVec2::new(
            style.width - 2.0 * style.padding,
            style.panel_height - 2.0 * style.padding,
        );

        let frame = Rectangle::new()
            .set("x", origin_px.x)
            .set("y", origin_px.y)
            .set("width", size_px.x)
            .set("height", size_px.y)
            .set("fill", "#ffffff")
            .set("stroke", "#333333");
        let title_text = Text::new(title)
            .set("x", origin_px.x + size_px.x * 0.5)
            .set("y", origin_px.y - 12.0)
            .set("font-size", 16)
            .set("text-anchor", "middle");
        let x_label = Text::new("X (m)")
            .set("x", origin_px.x + size_px.x * 0.5)
            .set("y", origin_px.y + size_px.y + 36.0)
            .set("font-size", 12)
            .set("text-anchor", "middle");
        let y_label = Text::new("Y (m)")
            .set("x", origin_px.x - 40.0)
            .set("y", origin_px.y + size_px.y * 0.5)
            .set("font-size", 12)
            .set("text-anchor", "middle");

        let mut panel = Self {
            bounds,
            origin_px,
            size_px,
            group: Group::new()
                .add(frame)
                .add(title_text)
                .add(x_label)
                .add(y_label),
        };
        panel.draw_ticks();
        panel
    }

    fn to_px(&self, p: Point2D) -> DVec2 {
        let extent = self.bounds.size().max(DVec2::splat(EPSILON));
        let t = (p - self.bounds.min) / extent;
        DVec2::new(
            self.origin_px.x + t.x * self.size_px.x,
            self.origin_px.y + (1.0 - t.y) * self.size_px.y,
        )
    }

    fn add<N: Into<Box<dyn Node>>>(&mut self, node: N) {
        self.group.append(node);
    }

    /// Beschriftet die Achsen an Minimum, Mitte und Maximum.
    fn draw_ticks(&mut self) {
        for t in [0.0, 0.5, 1.0] {
            let x = comparison::lerp(self.bounds.min.x, self.bounds.max.x, t);
            let y = comparison::lerp(self.bounds.min.y, self.bounds.max.y, t);
            let x_px = self.to_px(Point2D::new(x, self.bounds.min.y));
            let y_px = self.to_px(Point2D::new(self.bounds.min.x, y));
            self.add(
                Text::new(format!("{x:.1}"))
                    .set("x", x_px.x)
                    .set("y", x_px.y + 16.0)
                    .set("font-size", 10)
                    .set("text-anchor", "middle"),
            );
            self.add(
                Text::new(format!("{y:.1}"))
                    .set("x", y_px.x - 6.0)
                    .set("y", y_px.y + 4.0)
                    .set("font-size", 10)
                    .set("text-anchor", "end"),
            );
        }
    }

    fn draw_arrow(&mut self, from: Point2D, to: Point2D, color: &str, width: f64) {
        let a = self.to_px(from);
        let b = self.to_px(to);
        self.add(
            Line::new()
                .set("x1", a.x)
                .set("y1", a.y)
                .set("x2", b.x)
                .set("y2", b.y)
                .set("stroke", color)
                .set("stroke-width", width)
                .set("marker-end", "url(#arrow-head)"),
        );
    }

    fn draw_polyline(&mut self, points: &[Point2D], color: &str, width: f64) {
        let mut px = points.iter().map(|p| self.to_px(*p));
        let Some(first) = px.next() else {
            return;
        };
        let data = px.fold(
            Data::new().move_to((first.x as f32, first.y as f32)),
            |data, p| data.line_to((p.x as f32, p.y as f32)),
        );
        self.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", color)
                .set("stroke-width", width),
        );
    }

    fn draw_iso_line(&mut self, iso_line: &IsoLine, color: &str) {
        if iso_line.is_empty() {
            return;
        }
        let data = iso_line.segments.iter().fold(Data::new(), |data, [a, b]| {
            let (a, b) = (self.to_px(*a), self.to_px(*b));
            data.move_to((a.x as f32, a.y as f32))
                .line_to((b.x as f32, b.y as f32))
        });
        self.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", color)
                .set("stroke-width", 1.2),
        );
    }

    fn draw_charges(&mut self, charges: &ChargeSet, style: &PlotStyle) {
        for (i, charge) in charges.iter().enumerate() {
            let c = self.to_px(charge.position());
            self.add(
                Circle::new()
                    .set("cx", c.x)
                    .set("cy", c.y)
                    .set("r", style.charge_radius)
                    .set("fill", style.charge_color(charge.sign()))
                    .set("stroke", "#000000"),
            );
            self.add(
                Text::new(ChargeSet::label(i))
                    .set("x", c.x)
                    .set("y", c.y - style.charge_radius - 4.0)
                    .set("font-size", 12)
                    .set("text-anchor", "middle"),
            );
        }
    }

    /// Legende `q1 = … C` in der rechten oberen Ecke.
    fn draw_legend(&mut self, charges: &ChargeSet, style: &PlotStyle) {
        let x = self.origin_px.x + self.size_px.x - 8.0;
        for (i, charge) in charges.iter().enumerate() {
            let y = self.origin_px.y + 16.0 + 14.0 * i as f64;
            self.add(
                Text::new(format!("{} = {} C", ChargeSet::label(i), charge.magnitude()))
                    .set("x", x)
                    .set("y", y)
                    .set("font-size", 11)
                    .set("fill", style.charge_color(charge.sign()))
                    .set("text-anchor", "end"),
            );
        }
    }
}

// ===================================================================================
// 3. PLOT
// ===================================================================================
/// Alle Daten, die der Ladungsplot darstellt.
#[derive(Debug, Clone, Copy)]
pub struct ChargeFieldPlot<'a> {
    pub charges: &'a ChargeSet,
    pub evaluation: &'a FieldEvaluation,
    pub interactions: &'a [InteractionVector],
    pub iso_lines: &'a [IsoLine],
    pub field_lines: &'a [FieldLine],
}

impl ChargeFieldPlot<'_> {
    /// Erzeugt ein SVG mit zwei Panels: Äquipotentiallinien und Interaktionsvektoren.
    pub fn render(&self, style: &PlotStyle) -> MathResult<Document> {
        style.validate()?;
        let bounds = self.evaluation.grid.bounds();
        let height = 2.0 * style.panel_height;

        let arrow_head = Marker::new()
            .set("id", "arrow-head")
            .set("viewBox", (0, 0, 10, 10))
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto-start-reverse")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", "context-stroke"),
            );

        let mut top = Panel::new(bounds, 0.0, style, "Equipotential lines");
        self.draw_equipotentials(&mut top);
        for line in self.field_lines {
            top.draw_polyline(&line.points, "#9e9e9e", 0.8);
        }
        self.draw_quiver(&mut top, style);
        top.draw_charges(self.charges, style);
        top.draw_legend(self.charges, style);

        let mut bottom = Panel::new(bounds, style.panel_height, style, "Vectors");
        for interaction in self.interactions {
            if interaction.vector.is_finite() && interaction.vector != DVec2::ZERO {
                bottom.draw_arrow(
                    interaction.origin,
                    interaction.origin + interaction.vector,
                    "#0000ff",
                    2.0,
                );
            }
        }
        bottom.draw_charges(self.charges, style);
        bottom.draw_legend(self.charges, style);

        Ok(Document::new()
            .set("width", style.width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, style.width, height))
            .add(Definitions::new().add(arrow_head))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "#f0f0f0"),
            )
            .add(top.group)
            .add(bottom.group))
    }

    fn draw_equipotentials(&self, panel: &mut Panel) {
        let count = self.iso_lines.len();
        for (k, iso_line) in self.iso_lines.iter().enumerate() {
            let t = if count > 1 {
                k as f64 / (count - 1) as f64
            } else {
                0.5
            };
            panel.draw_iso_line(iso_line, &level_color(t));
        }
    }

    /// Normierte Feldpfeile an jeder Stützstelle.
    fn draw_quiver(&self, panel: &mut Panel, style: &PlotStyle) {
        let grid = &self.evaluation.grid;
        let min_step = |axis: &[f64]| {
            axis.windows(2)
                .map(|w| w[1] - w[0])
                .fold(f64::INFINITY, f64::min)
        };
        let cell = min_step(grid.xs()).min(min_step(grid.ys()));
        if !cell.is_finite() {
            return;
        }
        let length = cell * style.quiver_scale;

        let (rows, cols) = self.evaluation.shape();
        for y_idx in 0..rows {
            for x_idx in 0..cols {
                let Some(dir) = self.evaluation.field_sample(x_idx, y_idx).try_normalize() else {
                    continue;
                };
                let start = grid.point_at(x_idx, y_idx) - dir * length * 0.5;
                panel.draw_arrow(start, start + dir * length, "#555555", 0.8);
            }
        }
    }
}

/// Speichert das SVG-Dokument.
pub fn save_svg(path: impl AsRef<FsPath>, document: &Document) -> std::io::Result<()> {
    svg::save(path.as_ref(), document)?;
    info!("SVG '{}' wurde erstellt.", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::{contour_levels, iso_lines};
    use crate::physics::electrostatics::{
        FieldEvaluator, GridConfig, SampleGrid, StreamlineConfig, trace_field_lines,
    };

    fn render_dipole(style: &PlotStyle) -> MathResult<Document> {
        let charges = ChargeSet::builder()
            .with_charge(1e-9, Point2D::new(-1.0, 0.0))
            .with_charge(-2e-9, Point2D::new(1.0, 0.5))
            .build();
        let grid = SampleGrid::around_charges(&charges, &GridConfig::default())?;
        let evaluation = FieldEvaluator::evaluate(&charges, &grid)?;
        let interactions = FieldEvaluator::interaction_vectors(&charges)?;
        let levels = contour_levels(evaluation.potential.iter().copied(), 10);
        let contours = iso_lines(&evaluation.potential_field(), &levels);
        let lines = trace_field_lines(&charges, &grid.bounds(), &StreamlineConfig::default())?;

        ChargeFieldPlot {
            charges: &charges,
            evaluation: &evaluation,
            interactions: &interactions,
            iso_lines: &contours,
            field_lines: &lines,
        }
        .render(style)
    }

    #[test]
    fn test_render_contains_both_panels_and_labels() {
        let document = render_dipole(&PlotStyle::default()).unwrap().to_string();
        assert!(document.contains("Equipotential lines"));
        assert!(document.contains("Vectors"));
        assert!(document.contains("q1 = 0.000000001 C"));
        assert!(document.contains("q2"));
        // zwei Panels à zwei Ladungen
        assert_eq!(document.matches("<circle").count(), 4);
        assert!(document.contains("#d62728"));
        assert!(document.contains("#1f77b4"));
        assert!(document.contains("arrow-head"));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = PlotStyle {
            width: 100.0,
            ..PlotStyle::default()
        };
        assert!(matches!(
            render_dipole(&style),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_level_color_endpoints() {
        assert_eq!(level_color(0.0), "#440154");
        assert_eq!(level_color(1.0), "#fde725");
    }
}
