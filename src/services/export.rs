use minijinja::{context, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::Result;
use crate::models::{Bill, Header, Profile, WorkItem};
use crate::services::settings::{Settings, DEFAULT_CURRENCY_SYMBOL};
use crate::utils::{file_stem, format_currency, format_date, format_decimal};

const HTML_TEMPLATE: &str = include_str!("templates/invoice.html.jinja");
const CSS_STYLES: &str = include_str!("templates/invoice.css");

pub const HTML_MIME_TYPE: &str = "text/html";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        RenderOptions {
            currency_symbol: settings.currency_symbol.clone(),
        }
    }
}

#[derive(Serialize)]
struct InvoiceView {
    company_name: String,
    phone_number: String,
    address: String,
    client: String,
    date: String,
    sections: Vec<SectionView>,
    grand_total: String,
    advance_paid: String,
    balance_due: String,
}

#[derive(Serialize)]
struct SectionView {
    name: String,
    subtotal: String,
    rows: Vec<RowView>,
}

#[derive(Serialize)]
struct RowView {
    work_name: String,
    width: String,
    height: String,
    unit: String,
    area: String,
    rate: String,
    amount: String,
}

impl InvoiceView {
    fn new(bill: &Bill, profile: Option<&Profile>, options: &RenderOptions) -> Self {
        let money = |amount: f64| format_currency(amount, &options.currency_symbol);
        InvoiceView {
            company_name: profile
                .map(|p| p.company_name.clone())
                .unwrap_or_else(|| "Company Name".to_string()),
            phone_number: profile
                .map(|p| p.phone_number.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            address: profile
                .map(|p| p.address.clone())
                .unwrap_or_else(|| "Address not available".to_string()),
            client: bill.bill_name().to_string(),
            date: format_date(bill.created_at()),
            sections: bill
                .headers()
                .iter()
                .map(|header| SectionView::new(header, &money))
                .collect(),
            grand_total: money(bill.grand_total()),
            advance_paid: money(bill.advance_amount()),
            balance_due: money(bill.balance_due()),
        }
    }
}

impl SectionView {
    fn new(header: &Header, money: &dyn Fn(f64) -> String) -> Self {
        SectionView {
            name: header.name().to_string(),
            subtotal: money(header.subtotal()),
            rows: header
                .work_items()
                .iter()
                .map(|item| RowView::new(item, money))
                .collect(),
        }
    }
}

impl RowView {
    fn new(item: &WorkItem, money: &dyn Fn(f64) -> String) -> Self {
        let unit = if item.width_unit() == item.height_unit() {
            item.width_unit().to_string()
        } else {
            format!("{} × {}", item.width_unit(), item.height_unit())
        };
        RowView {
            work_name: item.work_name().to_string(),
            width: item.width().to_string(),
            height: item.height().to_string(),
            unit,
            area: format_decimal(item.area()),
            rate: money(item.rate()),
            amount: money(item.amount()),
        }
    }
}

/// Renders the printable invoice. Pure: the same bill, profile and options
/// always produce the same document (the date shown is the bill's creation
/// date).
pub fn render_invoice(
    bill: &Bill,
    profile: Option<&Profile>,
    options: &RenderOptions,
) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("invoice.html", HTML_TEMPLATE)?;
    let template = env.get_template("invoice.html")?;

    let invoice = InvoiceView::new(bill, profile, options);
    let html = template.render(context! {
        invoice,
        css_styles => CSS_STYLES,
    })?;
    Ok(html)
}

/// Title shown by the share sheet for a bill's document.
pub fn share_title(bill: &Bill) -> String {
    format!("{}_Invoice", bill.bill_name())
}

/// Turns rendered HTML into a file the user can share (a PDF printer on
/// device, a plain HTML file on desktop).
#[allow(async_fn_in_trait)]
pub trait DocumentProducer {
    async fn produce(&self, html: &str, file_stem: &str) -> Result<PathBuf>;
}

/// Hands a produced file to whatever the platform uses for sharing.
#[allow(async_fn_in_trait)]
pub trait ShareTarget {
    async fn share(&self, path: &Path, mime_type: &str, dialog_title: &str) -> Result<()>;
}

/// Writes `<stem>.html` into a directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct HtmlFileProducer {
    out_dir: PathBuf,
}

impl HtmlFileProducer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        HtmlFileProducer {
            out_dir: out_dir.into(),
        }
    }
}

impl DocumentProducer for HtmlFileProducer {
    async fn produce(&self, html: &str, file_stem: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(format!("{}.html", file_stem));
        tokio::fs::write(&path, html).await?;
        Ok(path)
    }
}

/// Opens the file with the system's default application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShare;

impl ShareTarget for SystemShare {
    async fn share(&self, path: &Path, mime_type: &str, dialog_title: &str) -> Result<()> {
        tracing::debug!("Opening {} ({}) as \"{}\"", path.display(), mime_type, dialog_title);
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || open::that(path))
            .await
            .map_err(std::io::Error::other)??;
        Ok(())
    }
}

async fn try_export<P, T>(
    bill: &Bill,
    profile: Option<&Profile>,
    options: &RenderOptions,
    producer: &P,
    share: &T,
) -> Result<PathBuf>
where
    P: DocumentProducer,
    T: ShareTarget,
{
    let html = render_invoice(bill, profile, options)?;
    let title = share_title(bill);
    let path = producer.produce(&html, &file_stem(&title)).await?;
    share.share(&path, HTML_MIME_TYPE, &title).await?;
    Ok(path)
}

/// Renders, produces and shares a bill's invoice. Failures are logged and
/// reported as `false`.
pub async fn export_invoice<P, T>(
    bill: &Bill,
    profile: Option<&Profile>,
    options: &RenderOptions,
    producer: &P,
    share: &T,
) -> bool
where
    P: DocumentProducer,
    T: ShareTarget,
{
    match try_export(bill, profile, options, producer, share).await {
        Ok(path) => {
            info!("Exported bill {} to {}", bill.id(), path.display());
            true
        }
        Err(err) => {
            error!("Error exporting bill {}: {}", bill.id(), err);
            false
        }
    }
}
