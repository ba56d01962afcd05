use dioxus::prelude::*;

pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 420;
const BRUSH_WIDTH: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub points: Vec<(f64, f64)>,
}

/// Drawn strokes plus an undo stack. A fresh stroke discards the redo stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
    undone: Vec<Stroke>,
    active: bool,
}

impl StrokeHistory {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.active
    }

    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn begin(&mut self, color: &str, at: (f64, f64)) {
        self.undone.clear();
        self.strokes.push(Stroke {
            color: color.to_string(),
            width: BRUSH_WIDTH,
            points: vec![at],
        });
        self.active = true;
    }

    pub fn extend(&mut self, to: (f64, f64)) {
        if !self.active {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(to);
        }
    }

    /// Close the active stroke, returning its color.
    pub fn end(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.active) {
            return None;
        }
        self.strokes.last().map(|stroke| stroke.color.clone())
    }

    pub fn undo(&mut self) -> bool {
        self.active = false;
        match self.strokes.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) -> bool {
        self.active = false;
        self.undone.clear();
        !std::mem::take(&mut self.strokes).is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    Draw { color: String },
    Undo,
    Redo,
    Clear,
}

#[component]
pub fn SketchCanvas(
    canvas_id: String,
    color: String,
    on_action: EventHandler<CanvasAction>,
) -> Element {
    let mut history = use_signal(StrokeHistory::default);

    let redraw_id = canvas_id.clone();
    use_effect(move || {
        let snapshot = history.read();
        render_strokes(&redraw_id, snapshot.strokes());
    });

    let brush = color.clone();
    let finish = move |_: MouseEvent| {
        let ended = history.write().end();
        if let Some(color) = ended {
            on_action.call(CanvasAction::Draw { color });
        }
    };

    let snapshot = history();

    rsx! {
        div { class: "sketch",
            canvas {
                id: "{canvas_id}",
                class: "sketch__surface",
                width: "{CANVAS_WIDTH}",
                height: "{CANVAS_HEIGHT}",
                onmousedown: move |evt: MouseEvent| {
                    let p = evt.element_coordinates();
                    history.write().begin(&brush, (p.x, p.y));
                },
                onmousemove: move |evt: MouseEvent| {
                    if history.peek().is_drawing() {
                        let p = evt.element_coordinates();
                        history.write().extend((p.x, p.y));
                    }
                },
                onmouseup: finish,
                onmouseleave: finish,
            }
            div { class: "sketch__tools",
                span {
                    class: "swatch swatch--small",
                    style: "background:{color}",
                    title: "{color}",
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: !snapshot.can_undo(),
                    onclick: move |_| {
                        if history.write().undo() {
                            on_action.call(CanvasAction::Undo);
                        }
                    },
                    "Undo"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: !snapshot.can_redo(),
                    onclick: move |_| {
                        if history.write().redo() {
                            on_action.call(CanvasAction::Redo);
                        }
                    },
                    "Redo"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| {
                        if history.write().clear() {
                            on_action.call(CanvasAction::Clear);
                        }
                    },
                    "Clear"
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn render_strokes(canvas_id: &str, strokes: &[Stroke]) {
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    let Some(canvas) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    for stroke in strokes {
        let Some(&(x0, y0)) = stroke.points.first() else {
            continue;
        };
        ctx.set_stroke_style_str(&stroke.color);
        ctx.set_line_width(stroke.width);
        ctx.begin_path();
        ctx.move_to(x0, y0);
        if stroke.points.len() == 1 {
            ctx.line_to(x0 + 0.1, y0);
        }
        for &(x, y) in &stroke.points[1..] {
            ctx.line_to(x, y);
        }
        ctx.stroke();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn render_strokes(_canvas_id: &str, _strokes: &[Stroke]) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_and_redo_move_whole_strokes() {
        let mut history = StrokeHistory::default();
        history.begin("#ff0000", (0.0, 0.0));
        history.extend((5.0, 5.0));
        assert_eq!(history.end(), Some("#ff0000".to_string()));
        assert_eq!(history.end(), None);

        assert!(history.undo());
        assert!(history.strokes().is_empty());
        assert!(history.redo());
        assert_eq!(history.strokes()[0].points.len(), 2);
        assert!(!history.redo());
    }

    #[test]
    fn new_stroke_discards_redo_stack() {
        let mut history = StrokeHistory::default();
        history.begin("#000000", (1.0, 1.0));
        history.end();
        history.undo();
        history.begin("#ffffff", (2.0, 2.0));
        history.end();
        assert!(!history.can_redo());
    }

    #[test]
    fn clear_reports_whether_anything_was_drawn() {
        let mut history = StrokeHistory::default();
        assert!(!history.clear());
        history.begin("#000000", (1.0, 1.0));
        history.end();
        assert!(history.clear());
        assert!(!history.can_undo());
    }

    #[test]
    fn moves_without_a_pressed_button_are_ignored() {
        let mut history = StrokeHistory::default();
        history.extend((3.0, 3.0));
        assert!(history.strokes().is_empty());
    }
}
