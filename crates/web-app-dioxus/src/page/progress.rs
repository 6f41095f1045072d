use chrono::{Local, NaiveDate};
use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::ProgressService;
use vigor_web_app as web_app;
use vigor_web_app::SettingsService;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route, WEB_APP_SERVICE,
    component::{
        element::{
            CenteredBlock, Chart, ChartLabel, DeleteConfirmationDialog, Dialog, ErrorMessage,
            FloatingActionButton, Icon, IntervalControl, LoadingPage, Table, value_or_dash,
        },
        form::{FieldValue, FieldValueState, InputField},
    },
    ensure_plan, signal_changed_data,
};

enum ProgressDialog {
    None,
    Add {
        date: FieldValue<NaiveDate>,
        weight: FieldValue<f32>,
        waist: FieldValue<Option<f32>>,
        chest: FieldValue<Option<f32>>,
        hips: FieldValue<Option<f32>>,
    },
    Delete(NaiveDate),
}

#[component]
pub fn Progress(add: bool) -> Element {
    let _ = ensure_plan!();

    let progress = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_progress().await
    });
    let dates = use_memo(move || {
        if let Some(Ok(entries)) = &*progress.read() {
            entries.iter().map(|entry| entry.date).collect::<Vec<_>>()
        } else {
            vec![]
        }
    });
    let current_interval =
        use_signal(|| domain::init_interval(&dates.read(), domain::DefaultInterval::_3M));
    let all = *use_memo(move || domain::Interval {
        first: dates.read().iter().min().copied().unwrap_or_default(),
        last: dates.read().iter().max().copied().unwrap_or_default(),
    })
    .read();
    let settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });
    let mut dialog = use_signal(|| ProgressDialog::None);

    let show_add_dialog = move || async move {
        let mut date = FieldValue::new(Local::now().date_naive());
        date.validated = DOMAIN_SERVICE
            .read()
            .validate_progress_date(&date.input)
            .map_err(|err| err.to_string());
        dialog.set(ProgressDialog::Add {
            date,
            weight: FieldValue::default(),
            waist: FieldValue::from_option(None::<f32>),
            chest: FieldValue::from_option(None::<f32>),
            hips: FieldValue::from_option(None::<f32>),
        });
        navigator().replace(Route::Progress { add: true });
    };

    use_future(move || async move {
        if add {
            show_add_dialog().await;
        }
    });

    match &*progress.read() {
        Some(Ok(entries)) => {
            let values = entries
                .iter()
                .map(|entry| (entry.date, entry.weight))
                .collect::<Vec<_>>();
            let avg_weight = domain::avg_weight(entries);
            let total_change = domain::total_change(entries);
            rsx! {
                IntervalControl { current_interval, all }
                Chart {
                    labels: vec![
                        ChartLabel {
                            name: "Weight (kg)".to_string(),
                            color: web_app::chart::COLOR_WEIGHT,
                            opacity: web_app::chart::OPACITY_AREA,
                        },
                        ChartLabel {
                            name: "Avg. weight (kg)".to_string(),
                            color: web_app::chart::COLOR_AVG_WEIGHT,
                            opacity: web_app::chart::OPACITY_LINE,
                        },
                    ],
                    chart: web_app::chart::plot_weight(
                        &values,
                        &avg_weight,
                        *current_interval.read(),
                        if let Some(Ok(settings)) = &*settings.read() {
                            settings.current_theme()
                        } else {
                            web_app::Theme::Light
                        },
                    ).map_err(|err| err.to_string()),
                    no_data_label: true,
                }
                if let Some(change) = total_change {
                    CenteredBlock {
                        span {
                            class: "is-size-5 has-text-weight-bold",
                            class: if change < 0.0 { "has-text-success" },
                            class: if change > 0.0 { "has-text-danger" },
                            {format!("{change:+.1} kg")}
                        }
                        p { class: "is-size-7 has-text-grey", "Total change" }
                    }
                }
                {table(entries, dialog)}
                {view_dialog(dialog)}
                FloatingActionButton {
                    icon: "plus".to_string(),
                    onclick: move |_| { show_add_dialog() },
                }
            }
        }
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        None => rsx! {
            LoadingPage {}
        },
    }
}

fn table(entries: &[domain::ProgressEntry], mut dialog: Signal<ProgressDialog>) -> Element {
    rsx! {
        Table {
            head: Some(vec![
                rsx! { "Date" },
                rsx! { "Weight (kg)" },
                rsx! { "Waist (cm)" },
                rsx! { "Chest (cm)" },
                rsx! { "Hips (cm)" },
                rsx! {},
            ]),
            body: entries
                .iter()
                .rev()
                .map(|entry| {
                    let date = entry.date;
                    vec![
                        rsx! { "{entry.date}" },
                        rsx! {
                            span {
                                class: "has-text-weight-bold has-text-link",
                                {format!("{:.1}", entry.weight)}
                            }
                        },
                        rsx! { {value_or_dash(entry.waist)} },
                        rsx! { {value_or_dash(entry.chest)} },
                        rsx! { {value_or_dash(entry.hips)} },
                        rsx! {
                            a {
                                onclick: move |_| dialog.set(ProgressDialog::Delete(date)),
                                Icon { name: "xmark", is_small: true }
                            }
                        },
                    ]
                })
                .collect::<Vec<_>>(),
        }
    }
}

fn view_dialog(mut dialog: Signal<ProgressDialog>) -> Element {
    let close = move |_| {
        dialog.set(ProgressDialog::None);
        navigator().replace(Route::Progress { add: false });
    };

    match &*dialog.read() {
        ProgressDialog::None => rsx! {},
        ProgressDialog::Add {
            date,
            weight,
            waist,
            chest,
            hips,
        } => {
            let save_disabled = date.validated.is_err()
                || weight.validated.is_err()
                || waist.validated.is_err()
                || chest.validated.is_err()
                || hips.validated.is_err();
            let date = date.clone();
            let weight = weight.clone();
            let waist = waist.clone();
            let chest = chest.clone();
            let hips = hips.clone();
            rsx! {
                Dialog {
                    title: rsx! { "Log progress" },
                    close_event: close,
                    InputField {
                        label: "Date".to_string(),
                        r#type: "date".to_string(),
                        max: Local::now().date_naive().to_string(),
                        value: date.input.clone(),
                        error: if let Err(err) = &date.validated { err.clone() },
                        has_changed: date.changed(),
                        oninput: move |event: FormEvent| {
                            if let ProgressDialog::Add { ref mut date, .. } = *dialog.write() {
                                date.input = event.value();
                                date.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_progress_date(&event.value())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Weight (kg)".to_string(),
                        inputmode: "decimal".to_string(),
                        value: weight.input.clone(),
                        error: if let Err(err) = &weight.validated { err.clone() },
                        has_changed: weight.changed(),
                        oninput: move |event: FormEvent| {
                            if let ProgressDialog::Add { ref mut weight, .. } = *dialog.write() {
                                weight.input = event.value();
                                weight.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_progress_weight(&event.value())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Waist (cm)".to_string(),
                        inputmode: "decimal".to_string(),
                        value: waist.input.clone(),
                        error: if let Err(err) = &waist.validated { err.clone() },
                        has_changed: waist.changed(),
                        oninput: move |event: FormEvent| {
                            if let ProgressDialog::Add { ref mut waist, .. } = *dialog.write() {
                                waist.input = event.value();
                                waist.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_circumference(&event.value())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Chest (cm)".to_string(),
                        inputmode: "decimal".to_string(),
                        value: chest.input.clone(),
                        error: if let Err(err) = &chest.validated { err.clone() },
                        has_changed: chest.changed(),
                        oninput: move |event: FormEvent| {
                            if let ProgressDialog::Add { ref mut chest, .. } = *dialog.write() {
                                chest.input = event.value();
                                chest.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_circumference(&event.value())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    InputField {
                        label: "Hips (cm)".to_string(),
                        inputmode: "decimal".to_string(),
                        value: hips.input.clone(),
                        error: if let Err(err) = &hips.validated { err.clone() },
                        has_changed: hips.changed(),
                        oninput: move |event: FormEvent| {
                            if let ProgressDialog::Add { ref mut hips, .. } = *dialog.write() {
                                hips.input = event.value();
                                hips.validated = DOMAIN_SERVICE
                                    .read()
                                    .validate_circumference(&event.value())
                                    .map_err(|err| err.to_string());
                            }
                        },
                    }
                    div {
                        class: "field is-grouped is-grouped-centered mt-4",
                        div {
                            class: "control",
                            button {
                                class: "button is-link",
                                disabled: save_disabled,
                                onclick: move |_| {
                                    let (Ok(date), Ok(weight), Ok(waist), Ok(chest), Ok(hips)) = (
                                        date.validated.clone(),
                                        weight.validated.clone(),
                                        waist.validated.clone(),
                                        chest.validated.clone(),
                                        hips.validated.clone(),
                                    ) else {
                                        return;
                                    };
                                    spawn(async move {
                                        match DOMAIN_SERVICE
                                            .read()
                                            .add_progress_entry(domain::ProgressEntry {
                                                date,
                                                weight,
                                                waist,
                                                chest,
                                                hips,
                                            })
                                            .await
                                        {
                                            Ok(_) => {
                                                dialog.set(ProgressDialog::None);
                                                signal_changed_data();
                                                navigator()
                                                    .replace(Route::Progress { add: false });
                                            }
                                            Err(err) => {
                                                NOTIFICATIONS.write().push(format!(
                                                    "Failed to save progress entry: {err}"
                                                ));
                                            }
                                        }
                                    });
                                },
                                "Save entry"
                            }
                        }
                    }
                }
            }
        }
        ProgressDialog::Delete(date) => {
            let date = *date;
            rsx! {
                DeleteConfirmationDialog {
                    element_type: "progress entry",
                    element_name: rsx! { "of {date}" },
                    delete_event: move |_| {
                        spawn(async move {
                            match DOMAIN_SERVICE.read().delete_progress_entry(date).await {
                                Ok(_) => {
                                    dialog.set(ProgressDialog::None);
                                    signal_changed_data();
                                }
                                Err(err) => {
                                    NOTIFICATIONS.write().push(format!(
                                        "Failed to delete progress entry: {err}"
                                    ));
                                }
                            }
                        });
                    },
                    cancel_event: move |_| dialog.set(ProgressDialog::None),
                }
            }
        }
    }
}
