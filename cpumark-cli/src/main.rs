mod options;

use std::fs::File;
use std::time::Instant;

use anyhow::Context;
use futures::stream::{FuturesUnordered, StreamExt};
use log::LevelFilter;
use structopt::StructOpt;

use cpumark::dataset::{Dataset, PreviousData};
use cpumark::fetch::{gather, CpuBenchmarkSite};
use cpumark::rank::apply_rankings;
use cpumark::record::CpuRecord;

use crate::options::Options;

const EXAMPLE_CPUS: [&str; 5] = [
    "Intel Xeon X5650 @ 2.67GHz&cpuCount=2",
    "Apple M1 Pro 10 Core",
    "Intel Core i7-6920HQ @ 2.90GHz",
    "Intel Core i9-9900K @ 3.60GHz",
    "Intel Xeon E5-2670 v2 @ 2.50GHz",
];

#[tokio::main]
async fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    let options = Options::from_args();

    if options.examples {
        println!("Example CPUs:");
        for cpu in &EXAMPLE_CPUS {
            println!("{}", cpu);
        }
        return;
    }

    if let Err(err) = run(options).await {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(options: Options) -> anyhow::Result<()> {
    let start = Instant::now();

    let list = std::fs::read_to_string(&options.input).with_context(|| {
        format!(
            "could not find the CPU list file '{}'",
            options.input.display()
        )
    })?;
    let cpus = parse_cpu_list(&list);

    /* reload the old output so user-added columns survive this run */
    let previous = PreviousData::load(&options.output)?;

    let mut records = scrape(&cpus, options.parallel).await.context(
        "make sure every CPU is valid and formatted correctly; \
         pass the -e flag to see formatting examples",
    )?;

    apply_rankings(&mut records);

    let mut dataset = Dataset::new(records);
    if let Some(previous) = &previous {
        dataset.merge_previous(previous);
    }

    log::info!("generating '{}'...", options.output.display());
    let file = File::create(&options.output).with_context(|| {
        format!(
            "unable to write to '{}'; make sure you have permission to write \
             to this file and it is not currently open",
            options.output.display()
        )
    })?;
    dataset.write_csv(file)?;

    log::info!("done, finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Fetch and assemble every requested CPU, either as a single batch or
/// fanned out across workers. Parallel batches come back in completion
/// order, not request order; no output is produced if any batch fails.
async fn scrape(
    cpus: &[String],
    parallel: Option<Option<usize>>,
) -> anyhow::Result<Vec<CpuRecord>> {
    let workers = match parallel {
        None => return gather(&CpuBenchmarkSite::default(), cpus).await,
        Some(n) => n.unwrap_or_else(available_workers),
    };
    let workers = workers.max(1).min(available_workers()).min(cpus.len().max(1));

    let mut batches = FuturesUnordered::new();
    for chunk in partition(cpus, workers) {
        batches.push(tokio::spawn(async move {
            gather(&CpuBenchmarkSite::default(), &chunk).await
        }));
    }

    let mut records = Vec::with_capacity(cpus.len());
    while let Some(joined) = batches.next().await {
        records.extend(joined??);
    }
    Ok(records)
}

fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Split the CPU list into `workers` contiguous chunks, spreading the
/// remainder one-per-chunk from the front so sizes stay balanced.
fn partition(cpus: &[String], workers: usize) -> Vec<Vec<String>> {
    let per_chunk = cpus.len() / workers;
    let mut extra = cpus.len() % workers;
    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0;

    for _ in 0..workers {
        let mut end = start + per_chunk;
        if extra > 0 {
            end += 1;
            extra -= 1;
        }
        chunks.push(cpus[start..end].to_vec());
        start = end;
    }
    chunks
}

/// One CPU identifier per line; everything from the first `#` or `//`
/// onward is a comment, and blank lines are skipped.
fn parse_cpu_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let cut = [line.find('#'), line.find("//")]
                .iter()
                .flatten()
                .copied()
                .min();
            let line = match cut {
                Some(at) => &line[..at],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_cpu_list, partition};

    #[test]
    fn test_parse_cpu_list_strips_comments() {
        let cpus = parse_cpu_list(
            "Intel Core i9-9900K @ 3.60GHz\n\
             Apple M1 Pro 10 Core # my laptop\n\
             // a whole-line comment\n\
             \n\
             Intel Xeon X5650 @ 2.67GHz&cpuCount=2 // server e.g. #rack4\n",
        );
        assert_eq!(
            cpus,
            vec![
                "Intel Core i9-9900K @ 3.60GHz",
                "Apple M1 Pro 10 Core",
                "Intel Xeon X5650 @ 2.67GHz&cpuCount=2",
            ]
        );
    }

    #[test]
    fn test_partition_is_contiguous_and_balanced() {
        let cpus: Vec<String> = (0..7).map(|n| n.to_string()).collect();
        let chunks = partition(&cpus, 3);
        assert_eq!(chunks.len(), 3);
        /* 7 = 3 + 2 + 2, remainder spread from the front */
        assert_eq!(chunks[0], vec!["0", "1", "2"]);
        assert_eq!(chunks[1], vec!["3", "4"]);
        assert_eq!(chunks[2], vec!["5", "6"]);
    }

    #[test]
    fn test_partition_exact_split() {
        let cpus: Vec<String> = (0..4).map(|n| n.to_string()).collect();
        let chunks = partition(&cpus, 2);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[1].len(), 2);
    }
}
