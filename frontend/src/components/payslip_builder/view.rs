//! View rendering for the payslip template builder.
//!
//! Three panes: a palette of addable blocks on the left, the live canvas in
//! the middle, and the property panel for the selected block on the right.
//! The canvas renders through the same resolution functions the PDF endpoint
//! uses, so what the preview shows is what the PDF prints. With no payroll
//! record bound, substitution tokens render literally.

use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::builder::command::{BlockCommand, BlockPatch, MoveDirection, PageStylesPatch};
use common::builder::render::{
    employee_grid_rows, format_money, net_pay_line, resolve_table, substitute_variables, TableKind,
    Variable,
};
use common::model::payslip::{
    Block, BlockContent, BlockKind, BlockStyles, CompanyHeaderContent, CustomRow, DividerContent,
    EmployeeGridContent, ImageContent, NetPayContent, SpacerContent, TableContent, TextContent,
    TitleContent,
};
use common::model::record::PayslipRecord;

use super::helpers::fresh_block_id;
use super::messages::Msg;
use super::state::PayslipBuilderComponent;

pub fn view(component: &PayslipBuilderComponent, ctx: &Context<PayslipBuilderComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="builder-root">
            { build_toolbar(component, link) }
            <div class="builder-panes" style="display: flex; align-items: flex-start; gap: 12px;">
                { build_palette(link) }
                { build_canvas(component, link) }
                { build_property_panel(component, link) }
            </div>
            { build_pdf_overlay(component, link) }
        </div>
    }
}

/// Top toolbar: template name, preview bindings, history and save actions.
fn build_toolbar(component: &PayslipBuilderComponent, link: &Scope<PayslipBuilderComponent>) -> Html {
    let on_name = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Dispatch(BlockCommand::SetName { name: input.value() })
    });
    let on_employee = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectEmployee(select.value())
    });
    let on_month = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetPreviewMonth(input.value())
    });

    html! {
        <div class="builder-toolbar" style="display: flex; align-items: center; gap: 8px; padding: 8px 0; position: relative;">
            <input
                class="template-name"
                value={component.config.name.clone()}
                oninput={on_name}
            />
            { dirty_dot(component) }
            <select onchange={on_employee}>
                {
                    component.employees.iter().map(|emp| {
                        let selected = component.selected_employee_id.as_deref() == Some(&emp.id);
                        html! {
                            <option value={emp.id.clone()} selected={selected}>
                                { emp.full_name() }
                            </option>
                        }
                    }).collect::<Html>()
                }
            </select>
            <input type="month" value={component.preview_month.clone()} onchange={on_month} />
            <button
                disabled={!component.history.can_undo()}
                onclick={link.callback(|_| Msg::Undo)}
            >{"Undo"}</button>
            <button
                disabled={!component.history.can_redo()}
                onclick={link.callback(|_| Msg::Redo)}
            >{"Redo"}</button>
            <button onclick={link.callback(|_| Msg::Save)}>{"Save"}</button>
            <button onclick={link.callback(|_| Msg::OpenPdf)}>{"PDF"}</button>
        </div>
    }
}

/// Red dot next to the name while there are unsaved edits.
fn dirty_dot(component: &PayslipBuilderComponent) -> Html {
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

/// Left pane: one button per addable block kind.
fn build_palette(link: &Scope<PayslipBuilderComponent>) -> Html {
    html! {
        <div class="block-palette" style="min-width: 160px;">
            <h4>{"Components"}</h4>
            {
                BlockKind::ALL.iter().map(|kind| {
                    let kind = *kind;
                    let onclick = link.callback(move |_| {
                        Msg::Dispatch(BlockCommand::AddBlock {
                            id: fresh_block_id(),
                            kind,
                        })
                    });
                    html! {
                        <button class="palette-item" style="display: block; width: 100%;" {onclick}>
                            { kind.label() }
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

/// Middle pane: the template rendered block by block, in order.
fn build_canvas(component: &PayslipBuilderComponent, link: &Scope<PayslipBuilderComponent>) -> Html {
    let styles = &component.config.styles;
    let page_style = format!(
        "background: {}; font-family: {}; font-size: {}; color: {}; padding: {}; flex: 1;",
        styles.background_color, styles.font_family, styles.font_size, styles.color, styles.padding
    );
    let record = component.preview_data.as_ref();

    html! {
        <div class="payslip-canvas" style={page_style} onclick={link.callback(|_| Msg::SelectBlock(None))}>
            {
                component.config.ordered_blocks().into_iter().map(|block| {
                    build_canvas_block(component, link, block, record)
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_canvas_block(
    component: &PayslipBuilderComponent,
    link: &Scope<PayslipBuilderComponent>,
    block: &Block,
    record: Option<&PayslipRecord>,
) -> Html {
    let selected = component.selected_block_id.as_deref() == Some(&block.id);
    let s = &block.styles;
    let wrapper_style = format!(
        "padding: {} {} {} {}; margin: {} 0 {} 0; outline: {};",
        s.padding_top,
        s.padding_right,
        s.padding_bottom,
        s.padding_left,
        s.margin_top,
        s.margin_bottom,
        if selected { "2px solid #2563eb" } else { "1px dashed transparent" }
    );

    let id = block.id.clone();
    let onclick = link.callback(move |e: MouseEvent| {
        e.stop_propagation();
        Msg::SelectBlock(Some(id.clone()))
    });

    html! {
        <div class="canvas-block" style={wrapper_style} {onclick}>
            { if selected { build_block_actions(link, &block.id) } else { html! {} } }
            { build_block_preview(&block.content, record) }
        </div>
    }
}

/// Move/duplicate/delete controls shown on the selected block.
fn build_block_actions(link: &Scope<PayslipBuilderComponent>, block_id: &str) -> Html {
    let up = {
        let id = block_id.to_string();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(BlockCommand::MoveBlock {
                id: id.clone(),
                direction: MoveDirection::Up,
            })
        })
    };
    let down = {
        let id = block_id.to_string();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(BlockCommand::MoveBlock {
                id: id.clone(),
                direction: MoveDirection::Down,
            })
        })
    };
    let duplicate = {
        let id = block_id.to_string();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(BlockCommand::DuplicateBlock {
                source_id: id.clone(),
                new_id: fresh_block_id(),
            })
        })
    };
    let remove = {
        let id = block_id.to_string();
        link.callback(move |e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(BlockCommand::RemoveBlock { id: id.clone() })
        })
    };

    html! {
        <div class="block-actions" style="display: flex; gap: 4px; justify-content: flex-end;">
            <button title="Move up" onclick={up}>{"\u{2191}"}</button>
            <button title="Move down" onclick={down}>{"\u{2193}"}</button>
            <button title="Duplicate" onclick={duplicate}>{"\u{29c9}"}</button>
            <button title="Delete" onclick={remove}>{"\u{2715}"}</button>
        </div>
    }
}

/// One block resolved against the bound record, for the canvas.
fn build_block_preview(content: &BlockContent, record: Option<&PayslipRecord>) -> Html {
    match content {
        BlockContent::Text(text) => {
            let style = format!(
                "text-align: {}; font-size: {}; font-weight: {}; white-space: pre-wrap;",
                text.align, text.size, text.weight
            );
            html! { <div {style}>{ substitute_variables(&text.text, record) }</div> }
        }
        BlockContent::Divider(divider) => {
            let style = format!(
                "border: none; border-top: {} {} {};",
                divider.thickness, divider.style, divider.color
            );
            html! { <hr {style} /> }
        }
        BlockContent::Spacer(spacer) => {
            html! { <div style={format!("height: {};", spacer.height)} /> }
        }
        BlockContent::Image(image) => {
            if image.url.is_empty() {
                html! { <div class="image-placeholder">{"[ image ]"}</div> }
            } else {
                html! { <img src={image.url.clone()} style={format!("height: {};", image.height)} /> }
            }
        }
        BlockContent::CompanyHeader(header) => build_company_header_preview(header),
        BlockContent::PayslipTitle(title) => {
            let style = format!("text-align: {}; font-weight: bold;", title.align);
            html! { <div {style}>{ substitute_variables(&title.text, record) }</div> }
        }
        BlockContent::EmployeeDetailsGrid(grid) => {
            let rows = employee_grid_rows(&grid.fields, record);
            let style = format!(
                "display: grid; grid-template-columns: repeat({}, 1fr); gap: 4px 16px;",
                grid.columns.max(1)
            );
            html! {
                <div {style}>
                    {
                        rows.into_iter().map(|(label, value)| html! {
                            <div>
                                <span style="color: #6b7280;">{ label }{": "}</span>
                                <span>{ value }</span>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            }
        }
        BlockContent::EarningsTable(table) => {
            build_money_table(resolve_table(TableKind::Earnings, table, record))
        }
        BlockContent::DeductionsTable(table) => {
            build_money_table(resolve_table(TableKind::Deductions, table, record))
        }
        BlockContent::ReimbursementsTable(table) => {
            build_money_table(resolve_table(TableKind::Reimbursements, table, record))
        }
        BlockContent::NetPayBox(net_pay) => {
            let (amount, words) = net_pay_line(record);
            let style = format!(
                "background: {}; color: {}; padding: 12px; border-radius: 4px;",
                net_pay.bg_color, net_pay.text_color
            );
            html! {
                <div {style}>
                    <div style="display: flex; justify-content: space-between; font-weight: bold;">
                        <span>{ net_pay.title.clone() }</span>
                        <span>{ amount }</span>
                    </div>
                    {
                        if words.is_empty() {
                            html! {}
                        } else {
                            html! { <div style="font-size: 0.85em;">{ words }</div> }
                        }
                    }
                </div>
            }
        }
        BlockContent::Unknown => {
            html! { <div class="unknown-block" style="color: #9ca3af;">{"[unsupported component]"}</div> }
        }
    }
}

fn build_company_header_preview(header: &CompanyHeaderContent) -> Html {
    html! {
        <div style={format!("text-align: {};", header.logo_align)}>
            {
                if header.show_logo && !header.logo_image.is_empty() {
                    html! { <img src={header.logo_image.clone()} style={format!("height: {};", header.logo_size)} /> }
                } else {
                    html! {}
                }
            }
            <div style={format!("font-size: {}; font-weight: bold;", header.company_name_size)}>
                { header.company_name.clone() }
            </div>
            {
                if header.show_address {
                    html! { <div>{ header.company_address.clone() }</div> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

/// An earnings/deductions/reimbursements table. Cell amounts carry the rupee
/// sign without a space, matching the PDF projection.
fn build_money_table(table: common::builder::render::ResolvedTable) -> Html {
    html! {
        <table style="width: 100%; border-collapse: collapse;">
            <thead>
                <tr style="border-bottom: 1px solid #e5e7eb; font-weight: bold;">
                    <td>{ table.title.clone() }</td>
                    <td style="text-align: right;">{"Amount"}</td>
                    { if table.show_ytd { html! { <td style="text-align: right;">{"YTD"}</td> } } else { html! {} } }
                </tr>
            </thead>
            <tbody>
                {
                    table.rows.iter().map(|row| html! {
                        <tr>
                            <td>{ row.name.clone() }</td>
                            <td style="text-align: right;">{ format!("₹{}", format_money(row.amount)) }</td>
                            {
                                if table.show_ytd {
                                    html! { <td style="text-align: right;">{ format!("₹{}", format_money(row.ytd)) }</td> }
                                } else {
                                    html! {}
                                }
                            }
                        </tr>
                    }).collect::<Html>()
                }
            </tbody>
            <tfoot>
                <tr style="border-top: 1px solid #e5e7eb; font-weight: bold;">
                    <td>{"Total"}</td>
                    <td style="text-align: right;">{ format!("₹{}", format_money(table.total_amount)) }</td>
                    {
                        if table.show_ytd {
                            html! { <td style="text-align: right;">{ format!("₹{}", format_money(table.total_ytd)) }</td> }
                        } else {
                            html! {}
                        }
                    }
                </tr>
            </tfoot>
        </table>
    }
}

/// Right pane: properties of the selected block, or page styles when nothing
/// is selected.
fn build_property_panel(
    component: &PayslipBuilderComponent,
    link: &Scope<PayslipBuilderComponent>,
) -> Html {
    let Some(block) = component
        .selected_block_id
        .as_ref()
        .and_then(|id| component.config.block(id))
    else {
        return build_page_styles_panel(component, link);
    };

    html! {
        <div class="property-panel" style="min-width: 240px;">
            <h4>{ block.content.kind_label() }</h4>
            { build_content_editor(link, block) }
            { build_spacing_editor(link, block) }
        </div>
    }
}

fn build_content_editor(link: &Scope<PayslipBuilderComponent>, block: &Block) -> Html {
    match &block.content {
        BlockContent::Text(text) => build_text_editor(link, &block.id, text),
        BlockContent::Divider(divider) => build_divider_editor(link, &block.id, divider),
        BlockContent::Spacer(spacer) => build_spacer_editor(link, &block.id, spacer),
        BlockContent::Image(image) => build_image_editor(link, &block.id, image),
        BlockContent::CompanyHeader(header) => build_header_editor(link, &block.id, header),
        BlockContent::PayslipTitle(title) => build_title_editor(link, &block.id, title),
        BlockContent::EmployeeDetailsGrid(grid) => build_grid_editor(link, &block.id, grid),
        BlockContent::EarningsTable(table) => {
            build_table_editor(link, &block.id, table, BlockContent::EarningsTable)
        }
        BlockContent::DeductionsTable(table) => {
            build_table_editor(link, &block.id, table, BlockContent::DeductionsTable)
        }
        BlockContent::ReimbursementsTable(table) => {
            build_table_editor(link, &block.id, table, BlockContent::ReimbursementsTable)
        }
        BlockContent::NetPayBox(net_pay) => build_net_pay_editor(link, &block.id, net_pay),
        BlockContent::Unknown => html! { <p>{"This block type has no editable properties."}</p> },
    }
}

/// Dispatch an `UpdateBlock` replacing the block's content.
fn content_patch(block_id: &str, content: BlockContent) -> Msg {
    Msg::Dispatch(BlockCommand::UpdateBlock {
        id: block_id.to_string(),
        patch: BlockPatch {
            content: Some(content),
            styles: None,
        },
    })
}

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

fn labeled(label: &str, control: Html) -> Html {
    html! {
        <label style="display: block; margin-bottom: 6px;">
            <span style="display: block; font-size: 0.8em; color: #6b7280;">{ label }</span>
            { control }
        </label>
    }
}

fn build_text_editor(link: &Scope<PayslipBuilderComponent>, block_id: &str, text: &TextContent) -> Html {
    let on_text = {
        let id = block_id.to_string();
        let base = text.clone();
        link.callback(move |e: InputEvent| {
            let value = e.target_unchecked_into::<web_sys::HtmlTextAreaElement>().value();
            content_patch(&id, BlockContent::Text(TextContent { text: value, ..base.clone() }))
        })
    };
    let on_align = {
        let id = block_id.to_string();
        let base = text.clone();
        link.callback(move |e: Event| {
            content_patch(&id, BlockContent::Text(TextContent { align: select_value(&e), ..base.clone() }))
        })
    };
    let on_size = {
        let id = block_id.to_string();
        let base = text.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Text(TextContent { size: input_value(&e), ..base.clone() }))
        })
    };
    let on_weight = {
        let id = block_id.to_string();
        let base = text.clone();
        link.callback(move |e: Event| {
            content_patch(&id, BlockContent::Text(TextContent { weight: select_value(&e), ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Text", html! { <textarea rows={4} value={text.text.clone()} oninput={on_text} /> }) }
            { labeled("Alignment", align_select(&text.align, on_align)) }
            { labeled("Font size", html! { <input value={text.size.clone()} oninput={on_size} /> }) }
            { labeled("Weight", html! {
                <select onchange={on_weight}>
                    <option value="normal" selected={text.weight == "normal"}>{"Normal"}</option>
                    <option value="bold" selected={text.weight == "bold"}>{"Bold"}</option>
                </select>
            }) }
            { variable_hint() }
        </>
    }
}

fn align_select(current: &str, onchange: Callback<Event>) -> Html {
    html! {
        <select {onchange}>
            <option value="left" selected={current == "left"}>{"Left"}</option>
            <option value="center" selected={current == "center"}>{"Center"}</option>
            <option value="right" selected={current == "right"}>{"Right"}</option>
        </select>
    }
}

/// Reminder of the substitutable tokens, shown under free-text editors.
fn variable_hint() -> Html {
    html! {
        <details>
            <summary>{"Variables"}</summary>
            <ul style="font-size: 0.8em; columns: 2; padding-left: 16px;">
                { Variable::ALL.iter().map(|v| html! { <li>{ v.token() }</li> }).collect::<Html>() }
            </ul>
        </details>
    }
}

fn build_divider_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    divider: &DividerContent,
) -> Html {
    let on_thickness = {
        let id = block_id.to_string();
        let base = divider.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Divider(DividerContent { thickness: input_value(&e), ..base.clone() }))
        })
    };
    let on_color = {
        let id = block_id.to_string();
        let base = divider.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Divider(DividerContent { color: input_value(&e), ..base.clone() }))
        })
    };
    let on_style = {
        let id = block_id.to_string();
        let base = divider.clone();
        link.callback(move |e: Event| {
            content_patch(&id, BlockContent::Divider(DividerContent { style: select_value(&e), ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Thickness", html! { <input value={divider.thickness.clone()} oninput={on_thickness} /> }) }
            { labeled("Color", html! { <input type="color" value={divider.color.clone()} oninput={on_color} /> }) }
            { labeled("Style", html! {
                <select onchange={on_style}>
                    <option value="solid" selected={divider.style == "solid"}>{"Solid"}</option>
                    <option value="dashed" selected={divider.style == "dashed"}>{"Dashed"}</option>
                    <option value="dotted" selected={divider.style == "dotted"}>{"Dotted"}</option>
                </select>
            }) }
        </>
    }
}

fn build_spacer_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    spacer: &SpacerContent,
) -> Html {
    let on_height = {
        let id = block_id.to_string();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Spacer(SpacerContent { height: input_value(&e) }))
        })
    };
    labeled("Height", html! { <input value={spacer.height.clone()} oninput={on_height} /> })
}

fn build_image_editor(link: &Scope<PayslipBuilderComponent>, block_id: &str, image: &ImageContent) -> Html {
    let on_url = {
        let id = block_id.to_string();
        let base = image.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Image(ImageContent { url: input_value(&e), ..base.clone() }))
        })
    };
    let on_height = {
        let id = block_id.to_string();
        let base = image.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::Image(ImageContent { height: input_value(&e), ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Image URL", html! { <input value={image.url.clone()} oninput={on_url} /> }) }
            { labeled("Height", html! { <input value={image.height.clone()} oninput={on_height} /> }) }
        </>
    }
}

fn build_header_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    header: &CompanyHeaderContent,
) -> Html {
    let on_name = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { company_name: input_value(&e), ..base.clone() }))
        })
    };
    let on_name_size = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { company_name_size: input_value(&e), ..base.clone() }))
        })
    };
    let on_address = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: InputEvent| {
            let value = e.target_unchecked_into::<web_sys::HtmlTextAreaElement>().value();
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { company_address: value, ..base.clone() }))
        })
    };
    let on_show_logo = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { show_logo: checked, ..base.clone() }))
        })
    };
    let on_show_address = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { show_address: checked, ..base.clone() }))
        })
    };
    let on_logo_align = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: Event| {
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { logo_align: select_value(&e), ..base.clone() }))
        })
    };
    let on_logo_size = {
        let id = block_id.to_string();
        let base = header.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::CompanyHeader(CompanyHeaderContent { logo_size: input_value(&e), ..base.clone() }))
        })
    };
    let on_logo_file = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        match file {
            Some(file) => Msg::LogoSelected(file),
            None => Msg::SelectBlock(None),
        }
    });

    html! {
        <>
            { labeled("Company name", html! { <input value={header.company_name.clone()} oninput={on_name} /> }) }
            { labeled("Name size", html! { <input value={header.company_name_size.clone()} oninput={on_name_size} /> }) }
            { labeled("Address", html! { <textarea rows={2} value={header.company_address.clone()} oninput={on_address} /> }) }
            <label style="display: block; margin-bottom: 6px;">
                <input type="checkbox" checked={header.show_address} onchange={on_show_address} />
                {" Show address"}
            </label>
            <label style="display: block; margin-bottom: 6px;">
                <input type="checkbox" checked={header.show_logo} onchange={on_show_logo} />
                {" Show logo"}
            </label>
            { labeled("Logo alignment", align_select(&header.logo_align, on_logo_align)) }
            { labeled("Logo size", html! { <input value={header.logo_size.clone()} oninput={on_logo_size} /> }) }
            { labeled("Logo image", html! { <input type="file" accept="image/*" onchange={on_logo_file} /> }) }
        </>
    }
}

fn build_title_editor(link: &Scope<PayslipBuilderComponent>, block_id: &str, title: &TitleContent) -> Html {
    let on_text = {
        let id = block_id.to_string();
        let base = title.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::PayslipTitle(TitleContent { text: input_value(&e), ..base.clone() }))
        })
    };
    let on_align = {
        let id = block_id.to_string();
        let base = title.clone();
        link.callback(move |e: Event| {
            content_patch(&id, BlockContent::PayslipTitle(TitleContent { align: select_value(&e), ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Title", html! { <input value={title.text.clone()} oninput={on_text} /> }) }
            { labeled("Alignment", align_select(&title.align, on_align)) }
            { variable_hint() }
        </>
    }
}

fn build_grid_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    grid: &EmployeeGridContent,
) -> Html {
    let on_columns = {
        let id = block_id.to_string();
        let base = grid.clone();
        link.callback(move |e: Event| {
            let columns = select_value(&e).parse().unwrap_or(2);
            content_patch(&id, BlockContent::EmployeeDetailsGrid(EmployeeGridContent { columns, ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Columns", html! {
                <select onchange={on_columns}>
                    <option value="1" selected={grid.columns == 1}>{"1"}</option>
                    <option value="2" selected={grid.columns == 2}>{"2"}</option>
                    <option value="3" selected={grid.columns == 3}>{"3"}</option>
                </select>
            }) }
            <span style="display: block; font-size: 0.8em; color: #6b7280;">{"Fields"}</span>
            {
                Variable::ALL.iter().map(|var| {
                    let var = *var;
                    let checked = grid.fields.iter().any(|f| f == var.name());
                    let id = block_id.to_string();
                    let base = grid.clone();
                    let onchange = link.callback(move |e: Event| {
                        let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                        let mut next = base.clone();
                        if checked {
                            if !next.fields.iter().any(|f| f == var.name()) {
                                next.fields.push(var.name().to_string());
                            }
                        } else {
                            next.fields.retain(|f| f != var.name());
                        }
                        content_patch(&id, BlockContent::EmployeeDetailsGrid(next))
                    });
                    html! {
                        <label style="display: block;">
                            <input type="checkbox" {checked} {onchange} />
                            {" "}{ var.label() }
                        </label>
                    }
                }).collect::<Html>()
            }
        </>
    }
}

fn build_table_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    table: &TableContent,
    wrap: fn(TableContent) -> BlockContent,
) -> Html {
    let on_title = {
        let id = block_id.to_string();
        let base = table.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, wrap(TableContent { title: input_value(&e), ..base.clone() }))
        })
    };
    let on_show_ytd = {
        let id = block_id.to_string();
        let base = table.clone();
        link.callback(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            content_patch(&id, wrap(TableContent { show_ytd: checked, ..base.clone() }))
        })
    };
    let on_add_row = {
        let id = block_id.to_string();
        let base = table.clone();
        link.callback(move |_| {
            let mut next = base.clone();
            next.custom_rows.push(CustomRow {
                id: format!("row_{}", uuid::Uuid::new_v4()),
                name: "New Row".into(),
                amount: 0.0,
                ytd: 0.0,
            });
            content_patch(&id, wrap(next))
        })
    };

    html! {
        <>
            { labeled("Title", html! { <input value={table.title.clone()} oninput={on_title} /> }) }
            <label style="display: block; margin-bottom: 6px;">
                <input type="checkbox" checked={table.show_ytd} onchange={on_show_ytd} />
                {" Show YTD column"}
            </label>
            <span style="display: block; font-size: 0.8em; color: #6b7280;">{"Custom rows (override payroll data)"}</span>
            {
                table.custom_rows.iter().map(|row| {
                    build_custom_row_editor(link, block_id, table, row, wrap)
                }).collect::<Html>()
            }
            <button onclick={on_add_row}>{"Add row"}</button>
        </>
    }
}

fn build_custom_row_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    table: &TableContent,
    row: &CustomRow,
    wrap: fn(TableContent) -> BlockContent,
) -> Html {
    let on_name = {
        let id = block_id.to_string();
        let base = table.clone();
        let row_id = row.id.clone();
        link.callback(move |e: InputEvent| {
            let mut next = base.clone();
            if let Some(r) = next.custom_rows.iter_mut().find(|r| r.id == row_id) {
                r.name = input_value(&e);
            }
            content_patch(&id, wrap(next))
        })
    };
    let on_amount = {
        let id = block_id.to_string();
        let base = table.clone();
        let row_id = row.id.clone();
        link.callback(move |e: InputEvent| {
            let mut next = base.clone();
            if let Some(r) = next.custom_rows.iter_mut().find(|r| r.id == row_id) {
                r.amount = input_value(&e).parse().unwrap_or(0.0);
            }
            content_patch(&id, wrap(next))
        })
    };
    let on_ytd = {
        let id = block_id.to_string();
        let base = table.clone();
        let row_id = row.id.clone();
        link.callback(move |e: InputEvent| {
            let mut next = base.clone();
            if let Some(r) = next.custom_rows.iter_mut().find(|r| r.id == row_id) {
                r.ytd = input_value(&e).parse().unwrap_or(0.0);
            }
            content_patch(&id, wrap(next))
        })
    };
    let on_remove = {
        let id = block_id.to_string();
        let base = table.clone();
        let row_id = row.id.clone();
        link.callback(move |_| {
            let mut next = base.clone();
            next.custom_rows.retain(|r| r.id != row_id);
            content_patch(&id, wrap(next))
        })
    };

    html! {
        <div style="display: flex; gap: 4px; margin-bottom: 4px;">
            <input style="flex: 2;" value={row.name.clone()} oninput={on_name} />
            <input style="flex: 1;" type="number" value={row.amount.to_string()} oninput={on_amount} />
            <input style="flex: 1;" type="number" value={row.ytd.to_string()} oninput={on_ytd} />
            <button onclick={on_remove}>{"\u{2715}"}</button>
        </div>
    }
}

fn build_net_pay_editor(
    link: &Scope<PayslipBuilderComponent>,
    block_id: &str,
    net_pay: &NetPayContent,
) -> Html {
    let on_title = {
        let id = block_id.to_string();
        let base = net_pay.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::NetPayBox(NetPayContent { title: input_value(&e), ..base.clone() }))
        })
    };
    let on_bg = {
        let id = block_id.to_string();
        let base = net_pay.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::NetPayBox(NetPayContent { bg_color: input_value(&e), ..base.clone() }))
        })
    };
    let on_fg = {
        let id = block_id.to_string();
        let base = net_pay.clone();
        link.callback(move |e: InputEvent| {
            content_patch(&id, BlockContent::NetPayBox(NetPayContent { text_color: input_value(&e), ..base.clone() }))
        })
    };

    html! {
        <>
            { labeled("Title", html! { <input value={net_pay.title.clone()} oninput={on_title} /> }) }
            { labeled("Background", html! { <input type="color" value={net_pay.bg_color.clone()} oninput={on_bg} /> }) }
            { labeled("Text color", html! { <input type="color" value={net_pay.text_color.clone()} oninput={on_fg} /> }) }
        </>
    }
}

/// Per-block padding and margin controls.
fn build_spacing_editor(link: &Scope<PayslipBuilderComponent>, block: &Block) -> Html {
    let fields: [(&str, fn(&BlockStyles) -> &String, fn(&mut BlockStyles, String)); 6] = [
        ("Padding top", |s| &s.padding_top, |s, v| s.padding_top = v),
        ("Padding bottom", |s| &s.padding_bottom, |s, v| s.padding_bottom = v),
        ("Padding left", |s| &s.padding_left, |s, v| s.padding_left = v),
        ("Padding right", |s| &s.padding_right, |s, v| s.padding_right = v),
        ("Margin top", |s| &s.margin_top, |s, v| s.margin_top = v),
        ("Margin bottom", |s| &s.margin_bottom, |s, v| s.margin_bottom = v),
    ];

    html! {
        <details>
            <summary>{"Spacing"}</summary>
            {
                fields.into_iter().map(|(label, get, set)| {
                    let id = block.id.clone();
                    let base = block.styles.clone();
                    let oninput = link.callback(move |e: InputEvent| {
                        let mut next = base.clone();
                        set(&mut next, input_value(&e));
                        Msg::Dispatch(BlockCommand::UpdateBlock {
                            id: id.clone(),
                            patch: BlockPatch {
                                content: None,
                                styles: Some(next),
                            },
                        })
                    });
                    labeled(label, html! { <input value={get(&block.styles).clone()} {oninput} /> })
                }).collect::<Html>()
            }
        </details>
    }
}

fn build_page_styles_panel(
    component: &PayslipBuilderComponent,
    link: &Scope<PayslipBuilderComponent>,
) -> Html {
    let styles = &component.config.styles;
    let style_input = |label: &'static str,
                       current: String,
                       input_type: &'static str,
                       patch_of: fn(String) -> PageStylesPatch| {
        let oninput = link.callback(move |e: InputEvent| {
            Msg::Dispatch(BlockCommand::UpdatePageStyles {
                patch: patch_of(input_value(&e)),
            })
        });
        labeled(label, html! { <input type={input_type} value={current} {oninput} /> })
    };

    html! {
        <div class="property-panel" style="min-width: 240px;">
            <h4>{"Page"}</h4>
            { style_input("Background", styles.background_color.clone(), "color", |v| PageStylesPatch { background_color: Some(v), ..Default::default() }) }
            { style_input("Font family", styles.font_family.clone(), "text", |v| PageStylesPatch { font_family: Some(v), ..Default::default() }) }
            { style_input("Font size", styles.font_size.clone(), "text", |v| PageStylesPatch { font_size: Some(v), ..Default::default() }) }
            { style_input("Text color", styles.color.clone(), "color", |v| PageStylesPatch { color: Some(v), ..Default::default() }) }
            { style_input("Padding", styles.padding.clone(), "text", |v| PageStylesPatch { padding: Some(v), ..Default::default() }) }
        </div>
    }
}

/// Fullscreen overlay with the generated PDF, shown after `Msg::OpenPdf`.
fn build_pdf_overlay(
    component: &PayslipBuilderComponent,
    link: &Scope<PayslipBuilderComponent>,
) -> Html {
    let Some(url) = &component.pdf_url else {
        return html! {};
    };
    html! {
        <div
            class="pdf-overlay"
            style="position: fixed; inset: 0; background: rgba(0,0,0,0.6); display: flex; flex-direction: column; z-index: 1000;"
        >
            <div style="text-align: right; padding: 8px;">
                <button onclick={link.callback(|_| Msg::ClosePdf)}>{"Close"}</button>
            </div>
            <iframe src={url.clone()} style="flex: 1; border: none; background: #fff;" />
        </div>
    }
}
