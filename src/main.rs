use clap::{App, Arg};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use loadgen_plot::fmt::LabelMode;
use loadgen_plot::plot::ScatterOptions;
use loadgen_plot::{plot, results, table};

const DEFAULT_CSV: &str = "resultados/pontos.csv";
const DEFAULT_LABEL_BY: &str = "clients";

type Args = (String, String, String, LabelMode, ScatterOptions);

fn main() -> Result<(), Report> {
    // init logging
    tracing_subscriber::fmt::init();

    let (folder, output, csv, label_mode, options) = parse_args();

    let points =
        results::collect(&folder, label_mode).wrap_err("collect points")?;
    table::export(&points, &csv).wrap_err("export points")?;
    plot::render(&points, &output, &options).wrap_err("render plot")?;

    println!("plot written to {}", output);
    println!("points exported to {}", csv);
    Ok(())
}

fn parse_args() -> Args {
    let matches = App::new("loadgen_plot")
        .version("0.1")
        .about("Generates a throughput-latency scatter plot from the result files produced by the loadgen.")
        .arg(
            Arg::with_name("folder")
                .long("folder")
                .value_name("DIR")
                .help("directory containing the .json result files produced by the loadgen")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("PATH")
                .help("path of the output image (png)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("csv")
                .long("csv")
                .value_name("PATH")
                .help("auxiliary csv with the plotted points; default: 'resultados/pontos.csv'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("label_by")
                .long("label-by")
                .value_name("MODE")
                .help("how to label each point; possible values 'clients' (number of clients in the run) and 'file' (cleaned-up result file name); default: 'clients'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .value_name("TITLE")
                .help("title of the chart; default: 'throughput vs latency'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dpi")
                .long("dpi")
                .value_name("DPI")
                .help("resolution of the output image; default: 200")
                .takes_value(true),
        )
        .get_matches();

    let folder = matches
        .value_of("folder")
        .expect("folder should be set")
        .to_string();
    let output = matches
        .value_of("output")
        .expect("output should be set")
        .to_string();
    let csv = matches.value_of("csv").unwrap_or(DEFAULT_CSV).to_string();
    let label_mode =
        parse_label_mode(matches.value_of("label_by").unwrap_or(DEFAULT_LABEL_BY));

    let mut options = ScatterOptions::default();
    if let Some(title) = matches.value_of("title") {
        options.title = title.to_string();
    }
    if let Some(dpi) = matches.value_of("dpi") {
        options.dpi = dpi.parse().expect("dpi should be a number");
    }

    (folder, output, csv, label_mode, options)
}

fn parse_label_mode(mode: &str) -> LabelMode {
    match mode {
        "clients" => LabelMode::ClientCount,
        "file" => LabelMode::SourceStem,
        _ => panic!(
            "unsupported label mode {}; possible values are 'clients' and 'file'",
            mode
        ),
    }
}
