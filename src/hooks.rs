use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::model::Point;
use crate::state::{PlaybackController, PlaybackSnapshot, TimerHost};

type SharedController = Rc<RefCell<PlaybackController<GlooTimers>>>;

/// Browser timer host. Holds at most one `Timeout`; dropping it clears the timer.
pub struct GlooTimers {
    controller: Weak<RefCell<PlaybackController<GlooTimers>>>,
    publish: Callback<PlaybackSnapshot>,
    pending: Option<Timeout>,
}

impl TimerHost for GlooTimers {
    fn schedule(&mut self, delay_ms: u32, generation: u64) {
        let controller = self.controller.clone();
        let publish = self.publish.clone();
        // The tick runs on a local task: it replaces `pending`, which must not
        // happen while the fired Timeout's own closure is still on the stack.
        self.pending = Some(Timeout::new(delay_ms, move || {
            spawn_local(async move {
                let Some(ctl) = controller.upgrade() else {
                    return;
                };
                let snapshot = {
                    let mut ctl = ctl.borrow_mut();
                    if !ctl.tick(generation) {
                        return;
                    }
                    ctl.snapshot()
                };
                publish.emit(snapshot);
            });
        }));
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

#[derive(Clone, PartialEq)]
pub struct PlaybackHandle {
    pub visited_count: usize,
    pub show_path: bool,
    pub is_animating: bool,
    pub skip: Callback<()>,
}

/// Reveals `order` one cell per `speed_ms`. A new `run_id` restarts from zero,
/// even when the order itself is unchanged. `show_path` stays false while the
/// run's path is empty.
#[hook]
pub fn use_playback(order: Rc<Vec<Point>>, path_len: usize, run_id: u64, speed_ms: u32) -> PlaybackHandle {
    // Snapshot tagged with the run it belongs to; a mismatch means the install
    // effect has not run yet for this render.
    let published = use_state(|| (run_id, PlaybackSnapshot::default()));
    let installed_run = use_mut_ref(|| run_id);
    let controller: Rc<SharedController> = {
        let setter = published.setter();
        let installed_run = installed_run.clone();
        use_memo((), move |_| {
            let publish = Callback::from(move |snapshot: PlaybackSnapshot| {
                setter.set((*installed_run.borrow(), snapshot));
            });
            Rc::new_cyclic(|weak| {
                RefCell::new(PlaybackController::new(
                    GlooTimers {
                        controller: weak.clone(),
                        publish,
                        pending: None,
                    },
                    speed_ms,
                ))
            })
        })
    };

    {
        let controller = controller.clone();
        use_effect_with(speed_ms, move |speed| {
            controller.borrow_mut().set_speed(*speed);
            || ()
        });
    }
    {
        let controller = controller.clone();
        let setter = published.setter();
        let installed_run = installed_run.clone();
        use_effect_with(run_id, move |run_id| {
            *installed_run.borrow_mut() = *run_id;
            let snapshot = {
                let mut ctl = controller.borrow_mut();
                ctl.install(order.len());
                ctl.snapshot()
            };
            setter.set((*run_id, snapshot));
            || ()
        });
    }
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            move || {
                tracing::debug!("playback torn down");
                controller.borrow_mut().teardown();
            }
        });
    }

    let skip = {
        let controller = controller.clone();
        let setter = published.setter();
        let installed_run = installed_run.clone();
        Callback::from(move |()| {
            let snapshot = {
                let mut ctl = controller.borrow_mut();
                ctl.skip();
                ctl.snapshot()
            };
            setter.set((*installed_run.borrow(), snapshot));
        })
    };

    let (published_run, snapshot) = *published;
    let snapshot = if published_run == run_id {
        snapshot
    } else {
        PlaybackSnapshot::default()
    };
    PlaybackHandle {
        visited_count: snapshot.cursor,
        show_path: snapshot.show_path(path_len),
        is_animating: snapshot.is_animating(),
        skip,
    }
}
