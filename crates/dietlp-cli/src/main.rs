use clap::{Parser, Subcommand};
use dietlp_solver::{
    DietProblem, EngineState, Item, SimplexEngine, Solution, SolveError, sensitivity,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dietlp")]
#[command(about = "Least-cost diet planning via the simplex method", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a menu and print the optimal purchase plan
    Solve {
        /// JSON menu file; omit to use the built-in reference menu
        file: Option<PathBuf>,
        /// Include the sensitivity sweep for purchased items
        #[arg(short, long)]
        sensitivity: bool,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Print every iteration's tableau
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check a menu file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

/// On-disk menu shape: nutrient names, minimum requirements, and items.
#[derive(Debug, Serialize, Deserialize)]
struct Menu {
    nutrients: Vec<String>,
    requirements: Vec<f64>,
    items: Vec<MenuItem>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MenuItem {
    name: String,
    cost: f64,
    nutrients: Vec<f64>,
}

#[derive(Serialize)]
struct JsonReport {
    status: String,
    nutrients: Vec<String>,
    solution: Solution,
    #[serde(skip_serializing_if = "Option::is_none")]
    sensitivity: Option<Vec<dietlp_solver::ItemSensitivity>>,
}

impl Menu {
    fn reference() -> Self {
        let items = vec![
            ("Oatmeal", 0.50, vec![5.0, 27.0, 3.0, 4.0, 15.0]),
            ("Chicken Breast", 3.00, vec![31.0, 0.0, 3.6, 0.0, 10.0]),
            ("Brown Rice", 0.30, vec![2.6, 23.0, 0.9, 1.8, 5.0]),
            ("Broccoli", 1.50, vec![2.8, 7.0, 0.4, 2.6, 135.0]),
            ("Banana", 0.25, vec![1.3, 27.0, 0.3, 3.1, 17.0]),
            ("Eggs", 2.00, vec![13.0, 1.1, 11.0, 0.0, 15.0]),
            ("Almonds", 4.50, vec![21.0, 22.0, 49.0, 12.0, 26.0]),
            ("Milk", 1.20, vec![8.0, 12.0, 8.0, 0.0, 50.0]),
        ];
        Self {
            nutrients: vec![
                "Protein (g)".to_string(),
                "Carbohydrates (g)".to_string(),
                "Fat (g)".to_string(),
                "Fiber (g)".to_string(),
                "Vitamins (%DV)".to_string(),
            ],
            requirements: vec![50.0, 130.0, 44.0, 25.0, 100.0],
            items: items
                .into_iter()
                .map(|(name, cost, nutrients)| MenuItem {
                    name: name.to_string(),
                    cost,
                    nutrients,
                })
                .collect(),
        }
    }

    fn load(path: &Path) -> Result<Self, String> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("error reading {}: {}", path.display(), e))?;
        serde_json::from_str(&source)
            .map_err(|e| format!("error parsing {}: {}", path.display(), e))
    }

    fn to_problem(&self) -> DietProblem {
        let items = self
            .items
            .iter()
            .map(|item| Item::new(item.name.clone(), item.cost, item.nutrients.clone()))
            .collect();
        DietProblem::new(items, self.requirements.clone())
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            sensitivity: with_sensitivity,
            format,
            verbose,
        } => {
            let mut builder = env_logger::Builder::from_default_env();
            if verbose {
                builder.filter_level(log::LevelFilter::Debug);
            }
            builder.init();

            let menu = match file {
                Some(path) => match Menu::load(&path) {
                    Ok(menu) => menu,
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                },
                None => Menu::reference(),
            };

            run_solve(&menu, with_sensitivity, &format, verbose);
        }
        Commands::Check { file } => {
            env_logger::init();
            match Menu::load(&file) {
                Ok(menu) => match menu.to_problem().validate() {
                    Ok(()) => {
                        println!("✓ {} is valid", file.display());
                        println!("  {} nutrients", menu.nutrients.len());
                        println!("  {} items", menu.items.len());
                    }
                    Err(e) => {
                        eprintln!("✗ {} has errors:", file.display());
                        eprintln!("  {e}");
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("✗ {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_solve(menu: &Menu, with_sensitivity: bool, format: &str, verbose: bool) {
    let problem = menu.to_problem();

    let mut engine = match SimplexEngine::new(&problem) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid input: {e}");
            std::process::exit(1);
        }
    };

    if verbose {
        println!("Initial tableau:");
        print_tableau(engine.tableau().snapshot().as_slice(), engine.tableau().basis());
    }

    let state = engine.run();

    if verbose {
        for snapshot in engine.snapshots() {
            println!(
                "\nIteration {}: pivot at row {}, column {}",
                snapshot.iteration, snapshot.pivot_row, snapshot.pivot_col
            );
            print_tableau(&snapshot.matrix, &[]);
        }
        println!();
    }

    let (status, solution) = match state {
        EngineState::Optimal => (
            "optimal",
            Solution::extract(engine.tableau(), &problem, dietlp_solver::EPSILON),
        ),
        EngineState::IterationLimitReached => (
            "iteration-limit",
            Solution::extract(engine.tableau(), &problem, dietlp_solver::EPSILON),
        ),
        EngineState::Unbounded { requirement } => {
            let e = SolveError::Unbounded { requirement };
            eprintln!("No solution: {e}");
            if let Some(name) = menu.nutrients.get(requirement) {
                eprintln!("(requirement {requirement} is {name})");
            }
            std::process::exit(1);
        }
        EngineState::Running => unreachable!("run() returned a non-terminal state"),
    };

    let report = if with_sensitivity {
        Some(sensitivity(&solution, &problem.items))
    } else {
        None
    };

    if format == "json" {
        let out = JsonReport {
            status: status.to_string(),
            nutrients: menu.nutrients.clone(),
            solution,
            sensitivity: report,
        };
        match serde_json::to_string_pretty(&out) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error serializing output: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if status == "iteration-limit" {
        println!("WARNING: iteration limit reached; this plan may not be optimal.\n");
    }
    print_solution(menu, &problem, &solution);
    if let Some(report) = report {
        print_sensitivity(&report);
    }
}

fn print_tableau(matrix: &[Vec<f64>], basis: &[usize]) {
    for (i, row) in matrix.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:8.3}")).collect();
        if let Some(col) = basis.get(i) {
            println!("{} | basis: {}", cells.join(" "), col);
        } else {
            println!("{}", cells.join(" "));
        }
    }
}

fn print_solution(menu: &Menu, problem: &DietProblem, solution: &Solution) {
    println!("Minimum daily cost: ${:.2}", solution.total_cost);
    if !solution.feasible {
        println!("WARNING: not all requirements are met by this plan.");
    }
    println!();
    println!("Quantities:");
    for (item, &amount) in problem.items.iter().zip(&solution.amounts) {
        if amount > dietlp_solver::EPSILON {
            println!(
                "  {:20} {:8.2} units  (${:.2})",
                item.name,
                amount,
                amount * item.unit_cost
            );
        }
    }
    println!();
    println!("Shadow prices (marginal value per requirement unit):");
    for (name, price) in menu.nutrients.iter().zip(&solution.shadow_prices) {
        println!("  {:20} ${:.6}", name, price);
    }
}

fn print_sensitivity(report: &[dietlp_solver::ItemSensitivity]) {
    println!();
    println!("Sensitivity (linear approximation, no re-solve):");
    for entry in report {
        println!();
        println!(
            "{} (current ${:.2}, quantity {:.2})",
            entry.item, entry.current_cost, entry.quantity
        );
        println!("  change | new cost | cost impact");
        for point in &entry.sweep {
            println!(
                "  {:5}% | ${:7.2} | ${:7.2}",
                point.pct_change, point.new_cost, point.cost_impact
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dietlp_solver::Solver;

    #[test]
    fn test_reference_menu_is_valid() {
        let menu = Menu::reference();
        assert!(menu.to_problem().validate().is_ok());
        assert_eq!(menu.nutrients.len(), 5);
        assert_eq!(menu.items.len(), 8);
    }

    #[test]
    fn test_reference_menu_solves() {
        let problem = Menu::reference().to_problem();
        let solution = Solver::new().solve(&problem).unwrap();
        assert!(solution.feasible);
        assert!(solution.total_cost > 0.0);
    }

    #[test]
    fn test_menu_round_trips_through_json() {
        let menu = Menu::reference();
        let json = serde_json::to_string(&menu).unwrap();
        let parsed: Menu = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.requirements, menu.requirements);
        assert_eq!(parsed.items.len(), menu.items.len());
        assert!(parsed.to_problem().validate().is_ok());
    }
}
