//! View rendering for the vendor form builder.
//!
//! Left pane: a palette of field types. Middle: the form canvas with its
//! sections and fields, reorderable by HTML5 drag and drop. Right: the
//! property panel for the selected field or section. A drag gesture is only
//! interpreted on drop, where it reduces to at most one structure command.

use web_sys::{DragEvent, Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::builder::command::{FieldPatch, FormCommand, SectionPatch};
use common::builder::reorder::{DragKind, DragLocation};
use common::model::form::{DropdownOption, Field, FieldType, FieldWidth, Section};

use super::messages::Msg;
use super::state::VendorBuilderComponent;

const FIELD_TYPES: [(FieldType, &str); 9] = [
    (FieldType::Text, "Text"),
    (FieldType::Number, "Number"),
    (FieldType::Email, "Email"),
    (FieldType::Textarea, "Text Area"),
    (FieldType::Select, "Dropdown"),
    (FieldType::Date, "Date"),
    (FieldType::File, "File Upload"),
    (FieldType::Checkbox, "Checkbox"),
    (FieldType::Phone, "Phone"),
];

const WIDTHS: [(FieldWidth, &str, &str); 4] = [
    (FieldWidth::Full, "full", "Full"),
    (FieldWidth::Half, "half", "Half"),
    (FieldWidth::Third, "third", "Third"),
    (FieldWidth::Quarter, "quarter", "Quarter"),
];

pub fn view(component: &VendorBuilderComponent, ctx: &Context<VendorBuilderComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="form-builder-root">
            { build_toolbar(component, link) }
            <div style="display: flex; align-items: flex-start; gap: 12px;">
                { build_palette(link) }
                { build_canvas(component, link) }
                { build_property_panel(component, link) }
            </div>
        </div>
    }
}

fn build_toolbar(component: &VendorBuilderComponent, link: &Scope<VendorBuilderComponent>) -> Html {
    let step_tab = |step: &'static str, label: &'static str| {
        let active = component.step == step;
        let onclick = link.callback(move |_| Msg::SetStep(step.to_string()));
        html! {
            <button class={classes!("tab-btn", active.then_some("active"))} {onclick}>
                { label }
            </button>
        }
    };

    html! {
        <div class="builder-toolbar" style="display: flex; align-items: center; gap: 8px; padding: 8px 0;">
            { step_tab("step1", "Step 1: Basic Details") }
            { step_tab("step2", "Step 2: Full Onboarding") }
            { dirty_dot(component) }
            <span style="flex: 1;" />
            <button
                disabled={!component.history.can_undo()}
                onclick={link.callback(|_| Msg::Undo)}
            >{"Undo"}</button>
            <button
                disabled={!component.history.can_redo()}
                onclick={link.callback(|_| Msg::Redo)}
            >{"Redo"}</button>
            <button onclick={link.callback(|_| Msg::AddSection)}>{"Add Section"}</button>
            <button onclick={link.callback(|_| Msg::Save)}>{"Save"}</button>
        </div>
    }
}

fn dirty_dot(component: &VendorBuilderComponent) -> Html {
    if component.is_dirty() {
        html! {
            <span
                title="Unsaved changes"
                style="width: 8px; height: 8px; background: #e53935; border-radius: 50%; display: inline-block;"
            />
        }
    } else {
        html! {}
    }
}

fn build_palette(link: &Scope<VendorBuilderComponent>) -> Html {
    html! {
        <div class="field-palette" style="min-width: 160px;">
            <h4>{"Field Types"}</h4>
            {
                FIELD_TYPES.iter().map(|(field_type, label)| {
                    let field_type = *field_type;
                    let onclick = link.callback(move |_| Msg::AddField(field_type));
                    html! {
                        <button class="palette-item" style="display: block; width: 100%;" {onclick}>
                            { *label }
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_canvas(component: &VendorBuilderComponent, link: &Scope<VendorBuilderComponent>) -> Html {
    let sections = component.config.ordered_sections();
    html! {
        <div class="form-canvas" style="flex: 1;" onclick={link.callback(|_| Msg::SelectSection(None))}>
            {
                sections.iter().enumerate().map(|(index, section)| {
                    build_section(component, link, *section, index)
                }).collect::<Html>()
            }
            {
                if sections.is_empty() {
                    html! { <p style="color: #9ca3af;">{"No sections yet. Add one to start."}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

/// A drop target accepting the drag gesture; the stored drag state decides
/// what the drop means.
fn drop_zone(
    link: &Scope<VendorBuilderComponent>,
    destination: DragLocation,
    inner: Html,
    style: String,
) -> Html {
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondrop = link.callback(move |e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::DroppedOn(destination.clone())
    });
    html! {
        <div {style} {ondragover} {ondrop}>
            { inner }
        </div>
    }
}

fn build_section(
    component: &VendorBuilderComponent,
    link: &Scope<VendorBuilderComponent>,
    section: &Section,
    index: usize,
) -> Html {
    let selected = component.selected_section_id.as_deref() == Some(&section.id);
    let section_id = section.id.clone();

    let on_title = {
        let id = section.id.clone();
        link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Dispatch(FormCommand::UpdateSection {
                id: id.clone(),
                patch: SectionPatch {
                    title: Some(input.value()),
                },
            })
        })
    };
    let on_delete = {
        let id = section.id.clone();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(FormCommand::DeleteSection { id: id.clone() })
        })
    };
    let on_select = {
        let id = section.id.clone();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::SelectSection(Some(id.clone()))
        })
    };
    let ondragstart = link.callback(move |_: DragEvent| {
        Msg::DragStarted(
            DragKind::Section,
            DragLocation {
                container_id: String::new(),
                index,
            },
        )
    });
    let ondragend = link.callback(|_: DragEvent| Msg::DragEnded);

    let header = html! {
        <div
            class="section-header"
            style="display: flex; align-items: center; gap: 8px; cursor: grab;"
            draggable="true"
            {ondragstart}
            {ondragend}
            onclick={on_select}
        >
            <span title="Drag to reorder">{"\u{2630}"}</span>
            <input value={section.title.clone()} oninput={on_title} />
            <button title="Delete section" onclick={on_delete}>{"\u{2715}"}</button>
        </div>
    };

    let fields = component.config.fields_in_section(&section.id);
    let field_count = fields.len();
    let outline = if selected { "2px solid #2563eb" } else { "1px solid #e5e7eb" };

    html! {
        <div class="form-section" style={format!("outline: {}; padding: 8px; margin-bottom: 12px;", outline)}>
            {
                drop_zone(
                    link,
                    DragLocation { container_id: String::new(), index },
                    header,
                    "padding-bottom: 8px;".into(),
                )
            }
            <div class="section-fields" style="display: flex; flex-wrap: wrap; gap: 8px;">
                {
                    fields.iter().enumerate().map(|(field_index, field)| {
                        build_field(component, link, *field, section_id.as_str(), field_index)
                    }).collect::<Html>()
                }
                {
                    // Tail slot so a field can be dropped at the end of the
                    // section, including into an empty one.
                    drop_zone(
                        link,
                        DragLocation { container_id: section_id.clone(), index: field_count },
                        html! { <span style="color: #d1d5db;">{"\u{22ef}"}</span> },
                        "min-width: 40px; min-height: 32px; display: flex; align-items: center; justify-content: center;".into(),
                    )
                }
            </div>
        </div>
    }
}

fn width_style(width: FieldWidth) -> &'static str {
    match width {
        FieldWidth::Full => "flex-basis: 100%;",
        FieldWidth::Half => "flex-basis: calc(50% - 8px);",
        FieldWidth::Third => "flex-basis: calc(33% - 8px);",
        FieldWidth::Quarter => "flex-basis: calc(25% - 8px);",
    }
}

fn build_field(
    component: &VendorBuilderComponent,
    link: &Scope<VendorBuilderComponent>,
    field: &Field,
    section_id: &str,
    index: usize,
) -> Html {
    let selected = component.selected_field_id.as_deref() == Some(&field.id);

    let on_select = {
        let id = field.id.clone();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::SelectField(Some(id.clone()))
        })
    };
    let on_delete = {
        let id = field.id.clone();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(FormCommand::DeleteField { id: id.clone() })
        })
    };
    let ondragstart = {
        let container = section_id.to_string();
        link.callback(move |_: DragEvent| {
            Msg::DragStarted(
                DragKind::Field,
                DragLocation {
                    container_id: container.clone(),
                    index,
                },
            )
        })
    };
    let ondragend = link.callback(|_: DragEvent| Msg::DragEnded);

    let outline = if selected { "2px solid #2563eb" } else { "1px dashed #d1d5db" };
    let card = html! {
        <div
            class="field-card"
            style={format!("outline: {}; padding: 6px; cursor: grab;", outline)}
            draggable="true"
            {ondragstart}
            {ondragend}
            onclick={on_select}
        >
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <span style="font-weight: 500;">
                    { field.label.clone() }
                    { if field.required { html! { <span style="color: #e53935;">{" *"}</span> } } else { html! {} } }
                </span>
                {
                    if field.is_system {
                        html! { <span class="locked-badge" style="font-size: 0.7em; color: #6b7280;">{"Locked"}</span> }
                    } else {
                        html! { <button title="Delete field" onclick={on_delete}>{"\u{2715}"}</button> }
                    }
                }
            </div>
            { build_field_input_preview(field) }
        </div>
    };

    // The drop zone wraps the card; width comes from the wrapper.
    drop_zone(
        link,
        DragLocation {
            container_id: section_id.to_string(),
            index,
        },
        card,
        width_style(field.width).to_string(),
    )
}

/// Disabled stand-in showing what the field will look like on the live form.
fn build_field_input_preview(field: &Field) -> Html {
    match field.field_type {
        FieldType::Textarea => {
            html! { <textarea disabled={true} placeholder={field.placeholder.clone()} rows={2} style="width: 100%;" /> }
        }
        FieldType::Select => html! {
            <select disabled={true} style="width: 100%;">
                <option>{ field.placeholder.clone() }</option>
                {
                    field.dropdown_options.iter().map(|opt| html! {
                        <option>{ opt.label.clone() }</option>
                    }).collect::<Html>()
                }
            </select>
        },
        FieldType::Checkbox => html! {
            <label><input type="checkbox" disabled={true} />{" "}{ field.placeholder.clone() }</label>
        },
        FieldType::File => html! { <input type="file" disabled={true} style="width: 100%;" /> },
        FieldType::Date => html! { <input type="date" disabled={true} style="width: 100%;" /> },
        _ => html! {
            <input disabled={true} placeholder={field.placeholder.clone()} style="width: 100%;" />
        },
    }
}

fn build_property_panel(
    component: &VendorBuilderComponent,
    link: &Scope<VendorBuilderComponent>,
) -> Html {
    if let Some(field) = component
        .selected_field_id
        .as_ref()
        .and_then(|id| component.config.field(id))
    {
        return build_field_properties(link, field);
    }
    if let Some(section) = component
        .selected_section_id
        .as_ref()
        .and_then(|id| component.config.section(id))
    {
        return build_section_properties(link, section);
    }
    html! {
        <div class="property-panel" style="min-width: 240px; color: #9ca3af;">
            <p>{"Select a field or section to edit its properties."}</p>
        </div>
    }
}

fn labeled(label: &str, control: Html) -> Html {
    html! {
        <label style="display: block; margin-bottom: 6px;">
            <span style="display: block; font-size: 0.8em; color: #6b7280;">{ label }</span>
            { control }
        </label>
    }
}

/// Dispatch an `UpdateField` carrying one patched property.
fn field_patch(field_id: &str, patch: FieldPatch) -> Msg {
    Msg::Dispatch(FormCommand::UpdateField {
        id: field_id.to_string(),
        patch,
    })
}

fn build_field_properties(link: &Scope<VendorBuilderComponent>, field: &Field) -> Html {
    let on_label = {
        let id = field.id.clone();
        link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field_patch(&id, FieldPatch { label: Some(input.value()), ..Default::default() })
        })
    };
    let on_placeholder = {
        let id = field.id.clone();
        link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field_patch(&id, FieldPatch { placeholder: Some(input.value()), ..Default::default() })
        })
    };
    let on_type = {
        let id = field.id.clone();
        link.callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let field_type = FIELD_TYPES
                .iter()
                .find(|(_, label)| *label == select.value())
                .map(|(t, _)| *t)
                .unwrap_or_default();
            field_patch(&id, FieldPatch { field_type: Some(field_type), ..Default::default() })
        })
    };
    let on_required = {
        let id = field.id.clone();
        link.callback(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field_patch(&id, FieldPatch { required: Some(input.checked()), ..Default::default() })
        })
    };
    let on_width = {
        let id = field.id.clone();
        link.callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let width = WIDTHS
                .iter()
                .find(|(_, value, _)| *value == select.value())
                .map(|(w, _, _)| *w)
                .unwrap_or_default();
            field_patch(&id, FieldPatch { width: Some(width), ..Default::default() })
        })
    };
    let on_db_key = {
        let id = field.id.clone();
        link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field_patch(&id, FieldPatch { db_key: Some(input.value()), ..Default::default() })
        })
    };

    // System fields keep their type locked unless they are dropdowns, and
    // their database key locked always. Mirror that in the controls.
    let type_locked = field.is_system && field.field_type != FieldType::Select;

    html! {
        <div class="property-panel" style="min-width: 240px;">
            <h4>{"Field"}</h4>
            {
                if field.is_system {
                    html! { <p style="font-size: 0.8em; color: #6b7280;">{"This is a system field. Its database key cannot change."}</p> }
                } else {
                    html! {}
                }
            }
            { labeled("Label", html! { <input value={field.label.clone()} oninput={on_label} /> }) }
            { labeled("Placeholder", html! { <input value={field.placeholder.clone()} oninput={on_placeholder} /> }) }
            { labeled("Type", html! {
                <select disabled={type_locked} onchange={on_type}>
                    {
                        FIELD_TYPES.iter().map(|(field_type, label)| html! {
                            <option value={*label} selected={field.field_type == *field_type}>{ *label }</option>
                        }).collect::<Html>()
                    }
                </select>
            }) }
            <label style="display: block; margin-bottom: 6px;">
                <input type="checkbox" checked={field.required} onchange={on_required} />
                {" Required"}
            </label>
            { labeled("Width", html! {
                <select onchange={on_width}>
                    {
                        WIDTHS.iter().map(|(width, value, label)| html! {
                            <option value={*value} selected={field.width == *width}>{ *label }</option>
                        }).collect::<Html>()
                    }
                </select>
            }) }
            { labeled("Database key", html! {
                <input value={field.db_key.clone()} disabled={field.is_system} oninput={on_db_key} />
            }) }
            {
                if field.field_type == FieldType::Select {
                    build_options_editor(link, field)
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_options_editor(link: &Scope<VendorBuilderComponent>, field: &Field) -> Html {
    let on_add = {
        let id = field.id.clone();
        let base = field.dropdown_options.clone();
        link.callback(move |_| {
            let mut next = base.clone();
            let n = next.len() + 1;
            next.push(DropdownOption {
                label: format!("Option {n}"),
                value: format!("option_{n}"),
            });
            field_patch(&id, FieldPatch { dropdown_options: Some(next), ..Default::default() })
        })
    };

    html! {
        <>
            <span style="display: block; font-size: 0.8em; color: #6b7280;">{"Options"}</span>
            {
                field.dropdown_options.iter().enumerate().map(|(i, opt)| {
                    let on_label = {
                        let id = field.id.clone();
                        let base = field.dropdown_options.clone();
                        link.callback(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = base.clone();
                            next[i].label = input.value();
                            field_patch(&id, FieldPatch { dropdown_options: Some(next), ..Default::default() })
                        })
                    };
                    let on_value = {
                        let id = field.id.clone();
                        let base = field.dropdown_options.clone();
                        link.callback(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = base.clone();
                            next[i].value = input.value();
                            field_patch(&id, FieldPatch { dropdown_options: Some(next), ..Default::default() })
                        })
                    };
                    let on_remove = {
                        let id = field.id.clone();
                        let base = field.dropdown_options.clone();
                        link.callback(move |_| {
                            let mut next = base.clone();
                            next.remove(i);
                            field_patch(&id, FieldPatch { dropdown_options: Some(next), ..Default::default() })
                        })
                    };
                    html! {
                        <div style="display: flex; gap: 4px; margin-bottom: 4px;">
                            <input style="flex: 1;" value={opt.label.clone()} oninput={on_label} />
                            <input style="flex: 1;" value={opt.value.clone()} oninput={on_value} />
                            <button onclick={on_remove}>{"\u{2715}"}</button>
                        </div>
                    }
                }).collect::<Html>()
            }
            <button onclick={on_add}>{"Add option"}</button>
        </>
    }
}

fn build_section_properties(link: &Scope<VendorBuilderComponent>, section: &Section) -> Html {
    let on_title = {
        let id = section.id.clone();
        link.callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Dispatch(FormCommand::UpdateSection {
                id: id.clone(),
                patch: SectionPatch {
                    title: Some(input.value()),
                },
            })
        })
    };

    html! {
        <div class="property-panel" style="min-width: 240px;">
            <h4>{"Section"}</h4>
            { labeled("Title", html! { <input value={section.title.clone()} oninput={on_title} /> }) }
        </div>
    }
}
