//! Static Chart Renderer
//! Off-screen PNG rendering of the dashboard charts with plotters, used by
//! the chart export action.

use crate::views::CategoryCount;
use anyhow::{anyhow, Context, Result};
use image::{ImageBuffer, Rgb};
use plotters::prelude::*;

const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

fn category_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a pie chart of category counts to PNG bytes.
    pub fn render_pie_to_bytes(
        title: &str,
        counts: &[CategoryCount],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;
            let root = root
                .titled(title, ("sans-serif", 28))
                .map_err(|e| anyhow!("{e}"))?;

            let total: usize = counts.iter().map(|c| c.count).sum();
            if total > 0 {
                let sizes: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();
                let labels: Vec<String> = counts
                    .iter()
                    .map(|c| {
                        let pct = 100.0 * c.count as f64 / total as f64;
                        format!("{} ({:.1}%)", c.category, pct)
                    })
                    .collect();
                let colors: Vec<RGBColor> = (0..counts.len()).map(category_color).collect();

                let center = ((width / 2) as i32, (height / 2) as i32 + 10);
                let radius = f64::from(width.min(height)) / 2.0 - 70.0;
                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
                pie.label_style(("sans-serif", 16).into_font());
                root.draw(&pie).map_err(|e| anyhow!("{e}"))?;
            }
            root.present().map_err(|e| anyhow!("{e}"))?;
        }
        encode_png(buf, width, height)
    }

    /// Render a bar chart of category counts to PNG bytes, category names on
    /// the x-axis.
    pub fn render_bar_to_bytes(
        title: &str,
        counts: &[CategoryCount],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

            if !counts.is_empty() {
                let labels: Vec<String> = counts.iter().map(|c| c.category.clone()).collect();
                let y_max = counts.iter().map(|c| c.count).max().unwrap_or(1) as f64 * 1.1;

                let mut chart = ChartBuilder::on(&root)
                    .caption(title, ("sans-serif", 28))
                    .margin(15)
                    .x_label_area_size(60)
                    .y_label_area_size(50)
                    .build_cartesian_2d(
                        (0usize..counts.len().saturating_sub(1)).into_segmented(),
                        0f64..y_max.max(1.0),
                    )
                    .map_err(|e| anyhow!("{e}"))?;

                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .y_desc("Count")
                    .x_desc("Crop")
                    .x_label_formatter(&|seg| match seg {
                        SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].clone(),
                        _ => String::new(),
                    })
                    .label_style(("sans-serif", 14))
                    .draw()
                    .map_err(|e| anyhow!("{e}"))?;

                chart
                    .draw_series(counts.iter().enumerate().map(|(i, c)| {
                        let mut bar = Rectangle::new(
                            [
                                (SegmentValue::Exact(i), 0.0),
                                (SegmentValue::Exact(i + 1), c.count as f64),
                            ],
                            category_color(i).filled(),
                        );
                        bar.set_margin(0, 0, 8, 8);
                        bar
                    }))
                    .map_err(|e| anyhow!("{e}"))?;
            }
            root.present().map_err(|e| anyhow!("{e}"))?;
        }
        encode_png(buf, width, height)
    }
}

fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, buf)
        .ok_or_else(|| anyhow!("chart buffer size mismatch"))?;
    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encoding chart PNG")?;
    Ok(bytes)
}
