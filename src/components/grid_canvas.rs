use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver, ResizeObserverEntry};
use yew::prelude::*;

use crate::model::{Grid, Point};
use crate::state::{
    BoundingRect, CanvasSurface, ContainerSize, CoordinateMapper, PointerTracker, Renderer, ResizeCoalescer, Scene,
};

#[derive(Properties, PartialEq, Clone)]
pub struct GridCanvasProps {
    pub grid: Option<Rc<Grid>>,
    pub visited_order: Rc<Vec<Point>>,
    pub visited_count: usize,
    pub path: Rc<Vec<Point>>,
    pub show_path: bool,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub on_select_cell: Callback<Point>,
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

fn measure(container: &HtmlElement) -> ContainerSize {
    let rect = container.get_bounding_client_rect();
    ContainerSize::new(rect.width(), rect.height())
}

fn client_rect(canvas: &HtmlCanvasElement) -> BoundingRect {
    let rect = canvas.get_bounding_client_rect();
    BoundingRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

#[function_component(GridCanvas)]
pub fn grid_canvas(props: &GridCanvasProps) -> Html {
    let container_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let renderer = use_mut_ref(|| None::<Renderer<CanvasSurface>>);
    let mapper = use_mut_ref(CoordinateMapper::default);
    let pointer = use_mut_ref(PointerTracker::default);
    let scene_ref = use_mut_ref(Scene::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let on_select_ref = use_mut_ref(|| props.on_select_cell.clone());
    *on_select_ref.borrow_mut() = props.on_select_cell.clone();

    // Mount: surface, resize observation and pointer listeners
    {
        let container_ref = container_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let renderer = renderer.clone();
        let mapper = mapper.clone();
        let pointer = pointer.clone();
        let scene_ref = scene_ref.clone();
        let draw_ref = draw_ref.clone();
        let on_select_ref = on_select_ref.clone();
        use_effect_with((), move |_| {
            let mounted = (
                web_sys::window(),
                container_ref.cast::<HtmlElement>(),
                canvas_ref.cast::<HtmlCanvasElement>(),
            );
            let (Some(window), Some(container), Some(canvas)) = mounted else {
                tracing::warn!("grid canvas mounted without its elements");
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };
            match CanvasSurface::new(canvas.clone()) {
                Ok(surface) => *renderer.borrow_mut() = Some(Renderer::new(surface)),
                Err(e) => tracing::warn!(error = %e, "maze will not be drawn"),
            }

            let draw: Rc<dyn Fn()> = {
                let renderer = renderer.clone();
                let mapper = mapper.clone();
                let pointer = pointer.clone();
                let scene_ref = scene_ref.clone();
                Rc::new(move || {
                    let mut renderer = renderer.borrow_mut();
                    let Some(renderer) = renderer.as_mut() else {
                        return;
                    };
                    let mut scene = scene_ref.borrow().clone();
                    scene.hovered = pointer.borrow().hovered;
                    let geometry = scene.grid.as_deref().and_then(|g| mapper.borrow().geometry_for(g));
                    let pass = renderer.render(scene, geometry);
                    tracing::trace!(?pass, "render pass");
                })
            };
            *draw_ref.borrow_mut() = Some(draw.clone());

            mapper.borrow_mut().resize(measure(&container), device_pixel_ratio());
            draw();

            // Resize bursts settle once per animation frame with the latest size.
            let coalescer = Rc::new(RefCell::new(ResizeCoalescer::default()));
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));
            let schedule_resize: Rc<dyn Fn(ContainerSize)> = {
                let coalescer = coalescer.clone();
                let frame = frame.clone();
                let mapper = mapper.clone();
                let draw = draw.clone();
                Rc::new(move |size: ContainerSize| {
                    if !coalescer.borrow_mut().notify(size) {
                        return;
                    }
                    let coalescer = coalescer.clone();
                    let mapper = mapper.clone();
                    let draw = draw.clone();
                    *frame.borrow_mut() = Some(request_animation_frame(move |_| {
                        let Some(size) = coalescer.borrow_mut().settle() else {
                            return;
                        };
                        let changed = mapper.borrow_mut().resize(size, device_pixel_ratio());
                        if changed {
                            tracing::debug!(width = size.width, height = size.height, "container resized");
                            draw();
                        }
                    }));
                })
            };

            let observer_cb = {
                let schedule_resize = schedule_resize.clone();
                Closure::wrap(Box::new(move |entries: js_sys::Array, _obs: ResizeObserver| {
                    let last = entries
                        .iter()
                        .filter_map(|e| e.dyn_into::<ResizeObserverEntry>().ok())
                        .last();
                    if let Some(entry) = last {
                        let rect = entry.content_rect();
                        schedule_resize(ContainerSize::new(rect.width(), rect.height()));
                    }
                }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>)
            };
            let observer = ResizeObserver::new(observer_cb.as_ref().unchecked_ref()).ok();
            if let Some(observer) = &observer {
                observer.observe(&container);
            } else {
                tracing::warn!("ResizeObserver unavailable; falling back to window resize only");
            }

            // Window resize also covers device pixel ratio changes (zoom, monitor moves).
            let resize_cb = {
                let schedule_resize = schedule_resize.clone();
                let container = container.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    schedule_resize(measure(&container));
                }) as Box<dyn FnMut(_)>)
            };
            let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

            let mousemove_cb = {
                let canvas = canvas.clone();
                let mapper = mapper.clone();
                let pointer = pointer.clone();
                let scene_ref = scene_ref.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let Some(grid) = scene_ref.borrow().grid.clone() else {
                        return;
                    };
                    let rect = client_rect(&canvas);
                    let mapped = mapper
                        .borrow()
                        .pixel_to_cell(&grid, e.client_x() as f64, e.client_y() as f64, &rect);
                    let changed = pointer.borrow_mut().on_move(&grid, mapped);
                    if changed {
                        draw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let _ = canvas.add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref());

            let mouseleave_cb = {
                let pointer = pointer.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    let changed = pointer.borrow_mut().on_leave();
                    if changed {
                        draw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let _ = canvas.add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref());

            let click_cb = {
                let canvas = canvas.clone();
                let mapper = mapper.clone();
                let scene_ref = scene_ref.clone();
                let on_select_ref = on_select_ref.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let Some(grid) = scene_ref.borrow().grid.clone() else {
                        return;
                    };
                    let rect = client_rect(&canvas);
                    let mapped = mapper
                        .borrow()
                        .pixel_to_cell(&grid, e.client_x() as f64, e.client_y() as f64, &rect);
                    if let Some(cell) = PointerTracker::click_target(&grid, mapped) {
                        let cb = on_select_ref.borrow().clone();
                        cb.emit(cell);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let _ = canvas.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());

            // Cleanup
            Box::new(move || {
                let _ = canvas.remove_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref());
                let _ =
                    canvas.remove_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                *frame.borrow_mut() = None;
                *draw_ref.borrow_mut() = None;
                *renderer.borrow_mut() = None;
                let _keep_alive = (&observer_cb, &mousemove_cb, &mouseleave_cb, &click_cb, &resize_cb);
            }) as Box<dyn FnOnce()>
        });
    }

    // Every render: publish the scene and let the renderer diff it.
    {
        let scene_ref = scene_ref.clone();
        let mapper = mapper.clone();
        let pointer = pointer.clone();
        let draw_ref = draw_ref.clone();
        let props = props.clone();
        use_effect(move || {
            {
                let mut scene = scene_ref.borrow_mut();
                let grid_replaced = match (&scene.grid, &props.grid) {
                    (Some(a), Some(b)) => !Rc::ptr_eq(a, b),
                    (None, None) => false,
                    _ => true,
                };
                if grid_replaced {
                    pointer.borrow_mut().on_leave();
                    let (w, h) = props.grid.as_deref().map(|g| (g.width(), g.height())).unwrap_or((0, 0));
                    mapper.borrow_mut().set_grid(w, h);
                }
                *scene = Scene {
                    grid: props.grid.clone(),
                    visited_order: props.visited_order.clone(),
                    visited_count: props.visited_count,
                    path: props.path.clone(),
                    show_path: props.show_path,
                    start: props.start,
                    goal: props.goal,
                    hovered: None,
                };
            }
            let draw = draw_ref.borrow().clone();
            if let Some(f) = draw {
                f();
            }
            || ()
        });
    }

    let placeholder = if props.grid.is_none() {
        html! {
            <div class="grid-placeholder" style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; color:#8b949e; font-size:14px; pointer-events:none;">
                {"Generate a maze to get started"}
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div ref={container_ref} class="grid-container" style="position:relative; width:100%; height:100%; min-height:320px; overflow:hidden;">
            <canvas ref={canvas_ref} id="maze-canvas" style="display:block; width:100%; height:100%; cursor:crosshair;"></canvas>
            { placeholder }
        </div>
    }
}
