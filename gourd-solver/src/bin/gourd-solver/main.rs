mod problems;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use convert_case::Case;
use gourd_solver::statistics::configure_statistic_logging;
use gourd_solver::CollectionMode;
use gourd_solver::SearchLimits;
use gourd_solver::SolveResult;
use gourd_solver::SolveStatus;
use gourd_solver::Solver;
use gourd_solver::SolverOptions;
use gourd_solver::ValueOrdering;
use gourd_solver::VariableOrdering;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use problems::Instance;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The model to solve.
    #[command(subcommand)]
    problem: Problem,

    /// Decides which unfixed variable the search branches on. Ties are broken by the order in
    /// which the variables were declared.
    #[arg(long, value_enum, default_value_t, global = true)]
    variable_ordering: VariableOrdering,

    /// Decides which value of the selected variable is tried first.
    #[arg(long, value_enum, default_value_t, global = true)]
    value_ordering: ValueOrdering,

    /// Decides which solutions are reported.
    ///
    /// - "first" stops at the first solution
    /// - "all" reports every solution, or every improving solution when optimising
    /// - "best" searches until the best solution is proven optimal
    #[arg(long, value_enum, default_value_t, global = true, verbatim_doc_comment)]
    mode: CollectionMode,

    /// The maximum number of decisions before the search gives up.
    ///
    /// Possible values: u64
    #[arg(long, global = true, verbatim_doc_comment)]
    node_limit: Option<u64>,

    /// The number of milliseconds the solver is given to solve the model.
    ///
    /// Possible values: u64
    #[arg(long, global = true, verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The maximum number of solutions before the search stops.
    ///
    /// Possible values: u64
    #[arg(long, global = true, verbatim_doc_comment)]
    solution_limit: Option<u64>,

    /// The seed of the random value ordering.
    ///
    /// Possible values: u64
    #[arg(long, default_value_t = 42, global = true, verbatim_doc_comment)]
    random_seed: u64,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", global = true, verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", global = true, verbatim_doc_comment)]
    log_statistics: bool,
}

#[derive(Debug, Subcommand)]
enum Problem {
    /// Place N queens on an N x N board such that none attack each other.
    Queens {
        /// The size of the board.
        #[arg(long, default_value_t = 8)]
        n: u32,
    },
    /// Solve the cryptarithm SEND + MORE = MONEY.
    SendMoreMoney,
    /// Maximise the value of a 0/1 knapsack.
    Knapsack,
    /// Assign workers to tasks at minimum cost.
    Assignment,
    /// Cover all elements with a cheapest selection of sets.
    SetCover,
}

impl Problem {
    fn build(&self) -> GourdResult<Instance> {
        match self {
            Problem::Queens { n } => problems::queens::build(*n),
            Problem::SendMoreMoney => problems::send_more_money::build(),
            Problem::Knapsack => problems::knapsack::build(),
            Problem::Assignment => problems::assignment::build(),
            Problem::SetCover => problems::set_cover::build(),
        }
    }
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        >= gourd_solver::asserts::GOURD_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, meaning every solution and backtrack is re-checked.",
            gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        );
    }

    let instance = args.problem.build()?;

    let mut limits = SearchLimits::default();
    if let Some(node_limit) = args.node_limit {
        limits = limits.with_node_limit(node_limit);
    }
    if let Some(time_limit) = args.time_limit {
        limits = limits.with_time_limit(Duration::from_millis(time_limit));
    }
    if let Some(solution_limit) = args.solution_limit {
        limits = limits.with_solution_limit(solution_limit);
    }

    let solver = Solver::new(SolverOptions {
        variable_ordering: args.variable_ordering,
        value_ordering: args.value_ordering,
        collection_mode: args.mode,
        limits,
        random_seed: args.random_seed,
    });

    let result = solver.solve(&instance.model);
    print_result(&instance, &result);
    result.statistics.log_all();

    Ok(())
}

fn print_result(instance: &Instance, result: &SolveResult) {
    for solution in &result.solutions {
        for &variable in &instance.outputs {
            let name = instance.model.name(variable).unwrap_or_default();
            println!("{name} = {};", solution.value(variable));
        }
        if let Some(objective_value) = solution.objective_value() {
            println!("objective = {objective_value};");
        }
        println!("----------");
    }

    match result.status {
        SolveStatus::Optimal => println!("=========="),
        SolveStatus::Infeasible => println!("=====UNSATISFIABLE====="),
        SolveStatus::Feasible => {}
        SolveStatus::LimitReached if result.has_solution() => {}
        SolveStatus::LimitReached => println!("=====UNKNOWN====="),
    }
}
