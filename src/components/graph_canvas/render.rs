use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{
	DrawCommand, LABEL_COLOR, OUTLINE_COLOR, OUTLINE_WIDTH, RING_COLOR, RING_WIDTH, Scene,
};
use super::types::{Point, Shape};

/// A frame that could not be painted. The caller skips it.
#[derive(Debug, Error)]
pub enum PaintError {
	/// The canvas has no 2d context.
	#[error("2d rendering context is unavailable")]
	ContextUnavailable,
	/// A context call threw.
	#[error("canvas call failed: {0}")]
	Canvas(String),
}

impl From<JsValue> for PaintError {
	fn from(value: JsValue) -> Self {
		Self::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// The canvas' 2d rendering context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, PaintError> {
	canvas
		.get_context("2d")?
		.ok_or(PaintError::ContextUnavailable)?
		.dyn_into()
		.map_err(|_| PaintError::ContextUnavailable)
}

/// Replay a scene onto the canvas.
pub fn paint(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<(), PaintError> {
	let ctx = context_2d(canvas)?;
	for command in &scene.commands {
		match command {
			DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
			DrawCommand::Edge {
				from,
				to,
				color,
				width,
				dash,
				alpha,
				..
			} => draw_edge(&ctx, *from, *to, color, *width, dash, *alpha)?,
			DrawCommand::Ring { center, radius } => {
				ctx.set_stroke_style_str(RING_COLOR);
				ctx.set_line_width(RING_WIDTH);
				ctx.begin_path();
				ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?;
				ctx.stroke();
			}
			DrawCommand::Node {
				shape,
				center,
				size,
				fill,
				..
			} => draw_node(&ctx, *shape, *center, *size, fill)?,
			DrawCommand::Label { text, at, font_px } => {
				ctx.set_fill_style_str(LABEL_COLOR);
				ctx.set_font(&format!("{font_px}px Arial"));
				ctx.set_text_align("center");
				ctx.fill_text(text, at.x, at.y)?;
			}
		}
	}
	Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f64]) -> Result<(), PaintError> {
	let segments: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d)).collect();
	ctx.set_line_dash(&segments)?;
	Ok(())
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	from: Point,
	to: Point,
	color: &str,
	width: f64,
	dash: &[f64],
	alpha: f64,
) -> Result<(), PaintError> {
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.set_global_alpha(alpha);
	set_dash(ctx, dash)?;

	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();

	// Nodes are always opaque and solid.
	ctx.set_global_alpha(1.0);
	set_dash(ctx, &[])
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	shape: Shape,
	Point { x, y }: Point,
	size: f64,
	fill: &str,
) -> Result<(), PaintError> {
	ctx.set_fill_style_str(fill);
	ctx.set_stroke_style_str(OUTLINE_COLOR);
	ctx.set_line_width(OUTLINE_WIDTH);

	match shape {
		Shape::Square => {
			let half = size / 2.0;
			ctx.fill_rect(x - half, y - half, size, size);
			ctx.stroke_rect(x - half, y - half, size, size);
			return Ok(());
		}
		Shape::Diamond => {
			ctx.begin_path();
			ctx.move_to(x, y - size);
			ctx.line_to(x + size, y);
			ctx.line_to(x, y + size);
			ctx.line_to(x - size, y);
			ctx.close_path();
		}
		Shape::Triangle => {
			ctx.begin_path();
			ctx.move_to(x, y - size);
			ctx.line_to(x - size, y + size / 2.0);
			ctx.line_to(x + size, y + size / 2.0);
			ctx.close_path();
		}
		Shape::Hexagon => {
			ctx.begin_path();
			for i in 0..6 {
				let angle = f64::from(i) * PI / 3.0;
				let (px, py) = (x + size * angle.cos(), y + size * angle.sin());
				if i == 0 {
					ctx.move_to(px, py);
				} else {
					ctx.line_to(px, py);
				}
			}
			ctx.close_path();
		}
		Shape::Circle => {
			ctx.begin_path();
			ctx.arc(x, y, size, 0.0, 2.0 * PI)?;
		}
	}
	ctx.fill();
	ctx.stroke();
	Ok(())
}
