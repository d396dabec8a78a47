// File: crates/benchplot-core/src/theme.rs
// Summary: Light/Dark palettes, colour tokens and the theme-change subscription source.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use skia_safe as skia;
use tracing::debug;

/// Straight-alpha RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_skia(self) -> skia::Color {
        skia::Color::from_argb(self.a, self.r, self.g, self.b)
    }

    /// `#rrggbb` for SVG attributes; alpha goes into a separate opacity attribute.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Symbolic colour reference stored in scene nodes, resolved against a [`Theme`]
/// at draw time so a theme change never touches geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Background,
    Surface,
    Text,
    MutedText,
    Grid,
    AxisLine,
    Accent,
    HoverAccent,
    Marker,
    Crosshair,
    TooltipBackground,
    TooltipBorder,
    /// Stroke colour of the series at this index.
    Series(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub surface: Rgba,
    pub text: Rgba,
    pub muted_text: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub accent: Rgba,
    pub hover_accent: Rgba,
    pub marker: Rgba,
    pub crosshair: Rgba,
    pub tooltip_background: Rgba,
    pub tooltip_border: Rgba,
    pub series: Vec<Rgba>,
    /// Per-chart colour assignment: series index -> palette slot.
    series_slots: Vec<usize>,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            surface: Rgba::rgb(250, 250, 252),
            text: Rgba::rgb(20, 20, 30),
            muted_text: Rgba::rgb(110, 110, 120),
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            accent: Rgba::rgb(16, 185, 129),
            hover_accent: Rgba::rgb(20, 20, 30),
            marker: Rgba::rgb(0, 0, 0),
            crosshair: Rgba::rgba(0, 0, 0, 60),
            tooltip_background: Rgba::rgba(255, 255, 255, 235),
            tooltip_border: Rgba::rgba(0, 0, 0, 50),
            series: vec![
                Rgba::rgb(32, 120, 200),
                Rgba::rgb(220, 80, 60),
                Rgba::rgb(20, 160, 90),
                Rgba::rgb(150, 90, 200),
                Rgba::rgb(230, 150, 20),
                Rgba::rgb(40, 170, 180),
            ],
            series_slots: Vec::new(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            surface: Rgba::rgb(0, 0, 0),
            text: Rgba::rgb(235, 235, 245),
            muted_text: Rgba::rgb(136, 136, 136),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            accent: Rgba::rgb(16, 185, 129),
            hover_accent: Rgba::rgb(255, 255, 255),
            marker: Rgba::rgb(235, 235, 245),
            crosshair: Rgba::rgba(255, 255, 255, 51),
            tooltip_background: Rgba::rgba(0, 0, 0, 217),
            tooltip_border: Rgba::rgba(255, 255, 255, 51),
            series: vec![
                Rgba::rgb(64, 160, 255),
                Rgba::rgb(255, 110, 90),
                Rgba::rgb(40, 200, 120),
                Rgba::rgb(190, 140, 255),
                Rgba::rgb(255, 200, 60),
                Rgba::rgb(70, 220, 230),
            ],
            series_slots: Vec::new(),
        }
    }

    /// Pin series colours from their style classes.
    ///
    /// A class of the form `series-N` picks palette slot N; anything else
    /// (including an empty class) uses the series' own index.
    pub fn with_style_classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        self.series_slots = classes
            .into_iter()
            .enumerate()
            .map(|(i, class)| palette_slot(class).unwrap_or(i))
            .collect();
        self
    }

    pub fn series_color(&self, index: usize) -> Rgba {
        if self.series.is_empty() {
            return self.accent;
        }
        let slot = self.series_slots.get(index).copied().unwrap_or(index);
        self.series[slot % self.series.len()]
    }

    pub fn resolve(&self, token: ColorToken) -> Rgba {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::Text => self.text,
            ColorToken::MutedText => self.muted_text,
            ColorToken::Grid => self.grid,
            ColorToken::AxisLine => self.axis_line,
            ColorToken::Accent => self.accent,
            ColorToken::HoverAccent => self.hover_accent,
            ColorToken::Marker => self.marker,
            ColorToken::Crosshair => self.crosshair,
            ColorToken::TooltipBackground => self.tooltip_background,
            ColorToken::TooltipBorder => self.tooltip_border,
            ColorToken::Series(i) => self.series_color(i),
        }
    }
}

fn palette_slot(class: &str) -> Option<usize> {
    class.strip_prefix("series-")?.parse().ok()
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
        .unwrap_or_else(Theme::light)
}

// ---- theme change notifications ---------------------------------------------

type Callback = Box<dyn FnMut(&str)>;

struct SourceInner {
    current: String,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
    /// Ids removed while their callback list was checked out for dispatch.
    removed_during_dispatch: Vec<u64>,
    dispatching: bool,
    /// Latest name set from inside a callback; dispatched once the current round ends.
    queued: Option<String>,
}

/// Shared, single-threaded theme discriminator (`"light"`, `"dark"`, ...)
/// with change notification. Clones observe the same state.
#[derive(Clone)]
pub struct ThemeSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl ThemeSource {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SourceInner {
                current: initial.into(),
                next_id: 0,
                subscribers: Vec::new(),
                removed_during_dispatch: Vec::new(),
                dispatching: false,
                queued: None,
            })),
        }
    }

    pub fn current(&self) -> String {
        self.inner.borrow().current.clone()
    }

    /// Change the theme; subscribers run only if the name actually changed.
    ///
    /// Called from inside a subscriber, the change is queued and delivered to
    /// every subscriber after the running round, so each round sees one name.
    pub fn set(&self, name: impl Into<String>) {
        let mut name = name.into();
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                inner.queued = Some(name);
                return;
            }
        }
        loop {
            let mut callbacks = {
                let mut inner = self.inner.borrow_mut();
                if inner.current == name {
                    return;
                }
                debug!(from = %inner.current, to = %name, "theme changed");
                inner.current = name.clone();
                inner.dispatching = true;
                std::mem::take(&mut inner.subscribers)
            };

            for (id, cb) in callbacks.iter_mut() {
                if self.inner.borrow().removed_during_dispatch.contains(id) {
                    continue;
                }
                cb(&name);
            }

            let (removed, queued) = {
                let mut inner = self.inner.borrow_mut();
                inner.dispatching = false;
                (std::mem::take(&mut inner.removed_during_dispatch), inner.queued.take())
            };
            let (mut kept, gone): (Vec<_>, Vec<_>) = callbacks.into_iter().partition(|(id, _)| !removed.contains(id));
            {
                // checked-out subscribers first, then any added during dispatch
                let mut inner = self.inner.borrow_mut();
                kept.append(&mut inner.subscribers);
                inner.subscribers = kept;
            }
            // closures may own subscriptions; drop them with the source unborrowed
            drop(gone);

            match queued {
                Some(next) => name = next,
                None => return,
            }
        }
    }

    /// Flip between `light` and `dark`.
    pub fn toggle(&self) {
        let next = if self.current().eq_ignore_ascii_case("dark") { "light" } else { "dark" };
        self.set(next);
    }

    /// Register `callback`; it stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: impl FnMut(&str) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        Subscription { source: Rc::downgrade(&self.inner), id }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Palette for the current discriminator.
    pub fn theme(&self) -> Theme {
        find(&self.current())
    }
}

impl Default for ThemeSource {
    fn default() -> Self {
        Self::new("light")
    }
}

impl fmt::Debug for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ThemeSource")
            .field("current", &inner.current)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Keeps a theme callback registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    source: Weak<RefCell<SourceInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.source.upgrade() else { return };
        let mut inner = inner.borrow_mut();
        inner.subscribers.retain(|(id, _)| *id != self.id);
        if inner.dispatching {
            let id = self.id;
            inner.removed_during_dispatch.push(id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
