//! Pager control: which links are shown, where they lead, and the outbound
//! change requests raised when one is activated.

use super::{
    types::{Control, Intent, LimitSelector, PageLink, PageWindow, PagerView, PagingDescriptor},
    window::page_window,
};
use crate::error::{AppError, AppResult};

/// Receiver of the pager's change requests.
pub trait PagerEvents {
    fn on_page_change(&mut self, page: u32);
    fn on_limit_change(&mut self, limit: u32);
}

/// Collects requests as intents for the caller to apply later.
impl PagerEvents for Vec<Intent> {
    fn on_page_change(&mut self, page: u32) {
        self.push(Intent::PageChange(page));
    }

    fn on_limit_change(&mut self, limit: u32) {
        self.push(Intent::LimitChange(limit));
    }
}

/// Adapts a pair of closures to [`PagerEvents`].
pub struct Callbacks<P, L> {
    pub on_page_change: P,
    pub on_limit_change: L,
}

impl<P: FnMut(u32), L: FnMut(u32)> PagerEvents for Callbacks<P, L> {
    fn on_page_change(&mut self, page: u32) {
        (self.on_page_change)(page)
    }

    fn on_limit_change(&mut self, limit: u32) {
        (self.on_limit_change)(limit)
    }
}

fn is_visible(d: &PagingDescriptor, w: &PageWindow, control: Control) -> bool {
    match control {
        Control::First => d.current_page > 2,
        Control::EllipsisBack => d.current_page > d.page_length,
        Control::Previous => d.current_page > 1,
        Control::Page(n) => w.contains(n),
        Control::Next => d.current_page < d.page_count,
        Control::EllipsisForward => {
            u64::from(d.current_page) + u64::from(d.page_length) < u64::from(d.page_count)
        }
        Control::Last => d.current_page < d.page_count.saturating_sub(1),
    }
}

fn target(d: &PagingDescriptor, w: &PageWindow, control: Control) -> u32 {
    match control {
        Control::First => 1,
        Control::EllipsisBack => w.page_start - 1,
        Control::Previous => d.current_page - 1,
        Control::Page(n) => n,
        Control::Next => d.current_page + 1,
        Control::EllipsisForward => w.page_end + 1,
        Control::Last => d.page_count,
    }
}

/// Build the render description for a normalized descriptor.
fn build_view(d: &PagingDescriptor) -> PagerView {
    let limit_selector = LimitSelector {
        options: d.limit_options.clone(),
        current: d.current_limit,
    };

    if d.page_count <= 1 {
        return PagerView {
            visible: false,
            window: None,
            links: vec![],
            limit_selector,
        };
    }

    let w = page_window(d);
    let leading = [Control::First, Control::EllipsisBack, Control::Previous];
    let trailing = [Control::Next, Control::EllipsisForward, Control::Last];
    let controls = leading
        .into_iter()
        .chain(w.pages().map(Control::Page))
        .chain(trailing);

    let links = controls
        .filter(|c| is_visible(d, &w, *c))
        .map(|c| PageLink {
            control: c,
            target: target(d, &w, c),
            active: c == Control::Page(d.current_page),
        })
        .collect();

    PagerView {
        visible: true,
        window: Some(w),
        links,
        limit_selector,
    }
}

/// Render the pager for `descriptor`.
pub fn render(descriptor: &PagingDescriptor) -> AppResult<PagerView> {
    let d = descriptor.clone().normalize()?;
    Ok(build_view(&d))
}

/// Activate `control`, reporting the target page to `events`.
///
/// Only controls present in the current render can be activated, so the
/// reported page always lies in `[1, page_count]`.
pub fn click(
    descriptor: &PagingDescriptor,
    control: Control,
    events: &mut impl PagerEvents,
) -> AppResult<u32> {
    let d = descriptor.clone().normalize()?;
    let view = build_view(&d);
    let Some(link) = view.links.iter().find(|l| l.control == control) else {
        tracing::debug!(?control, current_page = d.current_page, "rejected hidden control");
        return Err(AppError::ControlHidden(control));
    };
    tracing::debug!(?control, page = link.target, "page change");
    events.on_page_change(link.target);
    Ok(link.target)
}

/// Pick `limit` from the selector. Only offered values are accepted.
pub fn select_limit(
    descriptor: &PagingDescriptor,
    limit: u32,
    events: &mut impl PagerEvents,
) -> AppResult<u32> {
    let d = descriptor.clone().normalize()?;
    if !d.limit_options.contains(&limit) {
        return Err(AppError::LimitNotOffered(limit));
    }
    tracing::debug!(limit, "limit change");
    events.on_limit_change(limit);
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(current_page: u32, page_length: u32, page_count: u32) -> PagingDescriptor {
        PagingDescriptor {
            current_page,
            page_count,
            page_length,
            ..PagingDescriptor::default()
        }
    }

    fn numbers(view: &PagerView) -> Vec<u32> {
        view.links
            .iter()
            .filter_map(|l| match l.control {
                Control::Page(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn has(view: &PagerView, control: Control) -> bool {
        view.links.iter().any(|l| l.control == control)
    }

    #[test]
    fn single_page_renders_no_controls() {
        for page_length in [1, 3, 5] {
            let view = render(&desc(1, page_length, 1)).unwrap();
            assert!(!view.visible);
            assert!(view.links.is_empty());
            assert_eq!(view.limit_selector.options, vec![5, 10, 20, 50, 100]);
        }
    }

    #[test]
    fn number_of_page_links_is_bounded_by_window() {
        for page_length in [1u32, 3, 5, 7] {
            for page_count in 2u32..=30 {
                for current_page in 1..=page_count {
                    let view = render(&desc(current_page, page_length, page_count)).unwrap();
                    let nums = numbers(&view);
                    assert_eq!(nums.len(), page_length.min(page_count) as usize);
                    assert!(nums.contains(&current_page));
                    assert!(nums.windows(2).all(|p| p[0] + 1 == p[1]));
                }
            }
        }
    }

    #[test]
    fn marks_current_page_active() {
        let view = render(&desc(4, 3, 10)).unwrap();
        assert_eq!(numbers(&view), vec![3, 4, 5]);
        let active: Vec<_> = view.links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].control, Control::Page(4));
    }

    #[test]
    fn links_are_in_display_order() {
        let view = render(&desc(5, 3, 10)).unwrap();
        let controls: Vec<_> = view.links.iter().map(|l| l.control).collect();
        assert_eq!(
            controls,
            vec![
                Control::First,
                Control::EllipsisBack,
                Control::Previous,
                Control::Page(4),
                Control::Page(5),
                Control::Page(6),
                Control::Next,
                Control::EllipsisForward,
                Control::Last,
            ]
        );
    }

    #[test]
    fn first_and_last_click_targets() {
        let d = desc(5, 3, 10);
        let mut intents: Vec<Intent> = Vec::new();
        assert_eq!(click(&d, Control::First, &mut intents).unwrap(), 1);
        assert_eq!(click(&d, Control::Last, &mut intents).unwrap(), 10);
        assert_eq!(intents, vec![Intent::PageChange(1), Intent::PageChange(10)]);
    }

    #[test]
    fn back_ellipsis_jumps_before_window() {
        let mut intents: Vec<Intent> = Vec::new();
        click(&desc(5, 3, 10), Control::EllipsisBack, &mut intents).unwrap();
        assert_eq!(intents, vec![Intent::PageChange(3)]);
    }

    #[test]
    fn forward_ellipsis_jumps_past_window() {
        let mut intents: Vec<Intent> = Vec::new();
        click(&desc(3, 3, 10), Control::EllipsisForward, &mut intents).unwrap();
        assert_eq!(intents, vec![Intent::PageChange(5)]);
    }

    #[test]
    fn previous_next_and_numbers() {
        let d = desc(4, 5, 10);
        let mut intents: Vec<Intent> = Vec::new();
        click(&d, Control::Previous, &mut intents).unwrap();
        click(&d, Control::Next, &mut intents).unwrap();
        click(&d, Control::Page(6), &mut intents).unwrap();
        assert_eq!(
            intents,
            vec![
                Intent::PageChange(3),
                Intent::PageChange(5),
                Intent::PageChange(6)
            ]
        );
    }

    #[test]
    fn first_hidden_near_start_last_hidden_near_end() {
        for current_page in [1, 2] {
            let view = render(&desc(current_page, 5, 10)).unwrap();
            assert!(!has(&view, Control::First));
        }
        assert!(has(&render(&desc(3, 5, 10)).unwrap(), Control::First));

        for current_page in [9, 10] {
            let view = render(&desc(current_page, 5, 10)).unwrap();
            assert!(!has(&view, Control::Last));
        }
        assert!(has(&render(&desc(8, 5, 10)).unwrap(), Control::Last));
    }

    #[test]
    fn ellipsis_visibility() {
        let view = render(&desc(3, 3, 10)).unwrap();
        assert!(!has(&view, Control::EllipsisBack));
        assert!(has(&view, Control::EllipsisForward));

        let view = render(&desc(7, 3, 10)).unwrap();
        assert!(has(&view, Control::EllipsisBack));
        assert!(!has(&view, Control::EllipsisForward));
    }

    #[test]
    fn hidden_control_is_rejected_without_callback() {
        let mut intents: Vec<Intent> = Vec::new();
        let err = click(&desc(1, 5, 10), Control::Previous, &mut intents).unwrap_err();
        assert_eq!(err.code(), "CONTROL_HIDDEN");

        let err = click(&desc(1, 5, 10), Control::Page(9), &mut intents).unwrap_err();
        assert_eq!(err.code(), "CONTROL_HIDDEN");
        assert!(intents.is_empty());
    }

    #[test]
    fn every_visible_target_stays_in_range() {
        for page_length in [1u32, 3, 5] {
            for page_count in 2u32..=20 {
                for current_page in 1..=page_count {
                    let view = render(&desc(current_page, page_length, page_count)).unwrap();
                    for link in &view.links {
                        assert!((1..=page_count).contains(&link.target), "{link:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn select_limit_reports_exact_option() {
        let d = desc(3, 5, 10);
        let mut seen = Vec::new();
        let mut events = Callbacks {
            on_page_change: |_: u32| {},
            on_limit_change: |l: u32| seen.push(l),
        };
        for opt in [5, 10, 20, 50, 100] {
            select_limit(&d, opt, &mut events).unwrap();
        }
        assert_eq!(seen, vec![5, 10, 20, 50, 100]);
    }

    #[test]
    fn select_limit_rejects_unoffered_value() {
        let mut intents: Vec<Intent> = Vec::new();
        let err = select_limit(&desc(1, 5, 3), 15, &mut intents).unwrap_err();
        assert_eq!(err.code(), "LIMIT_NOT_OFFERED");
        assert!(intents.is_empty());
    }

    #[test]
    fn closure_callbacks_receive_page() {
        let mut pages = Vec::new();
        let mut events = Callbacks {
            on_page_change: |p: u32| pages.push(p),
            on_limit_change: |_: u32| {},
        };
        click(&desc(6, 5, 20), Control::First, &mut events).unwrap();
        assert_eq!(pages, vec![1]);
    }
}
