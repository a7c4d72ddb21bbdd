//! The command line front-end: reads an offer catalogue from a `.dzn` file, places the Secure Web
//! Container application onto it and prints the placement in the MiniZinc output format.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dzn_rs::DataFile;
use log::info;

use crate::engine::termination::Combinator;
use crate::engine::termination::OsSignal;
use crate::engine::termination::TerminationCondition;
use crate::engine::termination::TimeBudget;
use crate::engine::ParallelPlacementSolver;
use crate::engine::PlacementSolver;
use crate::engine::SolverOptions;
use crate::instance::topology::secure_web_container;
use crate::instance::InstanceError;
use crate::instance::ProblemInstance;
use crate::instance::VmOffer;
use crate::results::OptimisationResult;
use crate::results::PlacementSolution;
use crate::statistics::configure_statistic_logging;

#[derive(Debug, Parser)]
pub struct Cli {
    /// The data for the model: `VM`, `S`, and the arrays `CPUProv`, `MemProv`, `StorageProv`
    /// and `Price`.
    pub instance: PathBuf,

    /// The number of seconds the solver is allowed to run.
    #[arg(short = 't', long = "time-out")]
    pub time_out: Option<u64>,

    /// Search with this many worker threads. Without it the search is sequential.
    #[arg(short = 'w', long = "workers")]
    pub workers: Option<usize>,

    /// Do not force the used slots to be the first ones of the pool.
    #[arg(long = "no-symmetry-breaking")]
    pub no_symmetry_breaking: bool,

    /// Break ties between equally constrained slots randomly.
    #[arg(long = "random-ties")]
    pub random_ties: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    configure_statistic_logging("%% ", None, None);

    let data = std::fs::read_to_string(&args.instance)
        .with_context(|| format!("Error reading {}", args.instance.display()))?;

    let data = dzn_rs::parse::<i32>(data.as_bytes())
        .with_context(|| format!("Failed to parse DZN from {}", args.instance.display()))?;

    let instance = create_instance(&data)?;

    let options = SolverOptions {
        symmetry_breaking: !args.no_symmetry_breaking,
        random_tie_breaking: args.random_ties,
        num_workers: args.workers.unwrap_or(1),
        ..Default::default()
    };

    let signal = OsSignal::install().context("Failed to install the signal handlers")?;
    let mut termination = Combinator::new(
        signal,
        args.time_out
            .map(|seconds| TimeBudget::starting_now(Duration::from_secs(seconds))),
    );

    solve(instance, options, args.workers.is_some(), &mut termination)
}

pub fn solve(
    instance: ProblemInstance,
    options: SolverOptions,
    parallel: bool,
    termination: &mut (impl TerminationCondition + Send),
) -> anyhow::Result<()> {
    let result = if parallel {
        match ParallelPlacementSolver::new(instance.clone(), options) {
            Ok(mut solver) => {
                let brancher = solver.default_brancher();
                let result = solver.optimise(&brancher, termination);
                solver.log_statistics();
                result
            }
            Err(error) => return report_invalid(error),
        }
    } else {
        match PlacementSolver::new(instance.clone(), options) {
            Ok(mut solver) => {
                let mut brancher = solver.default_brancher();
                let result = solver.optimise(&mut brancher, termination);
                solver.log_statistics();
                result
            }
            Err(error) => return report_invalid(error),
        }
    };

    match result {
        OptimisationResult::Optimal(solution) => {
            print_solution(&instance, &solution);
            println!("==========");
        }
        OptimisationResult::Satisfiable(solution) => print_solution(&instance, &solution),
        OptimisationResult::Unsatisfiable => println!("UNSATISFIABLE"),
        OptimisationResult::Unknown => println!("UNKNOWN"),
    }

    Ok(())
}

/// An instance which can never be placed is a definitive answer; any other validation error is a
/// problem with the input.
fn report_invalid(error: InstanceError) -> anyhow::Result<()> {
    if error.is_infeasibility() {
        info!("{error}");
        println!("UNSATISFIABLE");
        Ok(())
    } else {
        Err(error).context("The instance is invalid")
    }
}

fn create_instance(data: &DataFile<i32>) -> anyhow::Result<ProblemInstance> {
    let num_slots = get_count(data, "VM")?;
    let num_offers = get_count(data, "S")?;

    let cpu = get_array(data, "CPUProv", num_offers)?;
    let memory = get_array(data, "MemProv", num_offers)?;
    let storage = get_array(data, "StorageProv", num_offers)?;
    let price = get_array(data, "Price", num_offers)?;

    let offers = (0..num_offers)
        .map(|offer| {
            VmOffer::new(
                format!("Offer{}", offer + 1),
                [cpu[offer], memory[offer], storage[offer]],
                price[offer],
            )
        })
        .collect::<Vec<_>>();

    Ok(secure_web_container(num_slots, offers))
}

fn get_count(data: &DataFile<i32>, key: &str) -> anyhow::Result<usize> {
    let value: i32 = data
        .get(key)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Missing int parameter '{key}' in data."))?;

    value
        .try_into()
        .map_err(|_| anyhow::anyhow!("'{key}' should be an unsigned integer."))
}

fn get_array(data: &DataFile<i32>, key: &str, len: usize) -> anyhow::Result<Vec<u32>> {
    let array = data
        .array_1d::<i32>(key, len)
        .ok_or_else(|| anyhow::anyhow!("Missing 1d int array '{key}' of length {len}."))?;

    (0..len)
        .map(|idx| {
            let value = array
                .get([idx])
                .copied()
                .ok_or_else(|| anyhow::anyhow!("'{key}' has no element {idx}."))?;

            u32::try_from(value)
                .map_err(|_| anyhow::anyhow!("'{key}' should only contain unsigned integers."))
        })
        .collect()
}

fn print_solution(instance: &ProblemInstance, solution: &PlacementSolution) {
    for component in instance.component_ids() {
        let row = (0..solution.num_slots())
            .map(|slot| u8::from(solution.is_placed(component, slot)).to_string())
            .collect::<Vec<_>>();

        println!(
            "{} = [{}];",
            instance.component(component).name,
            row.join(", ")
        );
    }

    let types = solution
        .slots()
        .iter()
        .map(|slot| slot.offer.map_or(0, |offer| offer.index() + 1).to_string())
        .collect::<Vec<_>>();
    println!("Type = [{}];", types.join(", "));

    let prices = solution
        .slots()
        .iter()
        .map(|slot| slot.price.to_string())
        .collect::<Vec<_>>();
    println!("Price = [{}];", prices.join(", "));

    println!("Cost = {};", solution.total_cost());
    println!("----------");
}
