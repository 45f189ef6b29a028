use clap::Args;
use serde_json::Value;

use home_finance_core::funding::plan::{self, FundingPlanInput};

use crate::input;

/// Arguments for the funding plan
#[derive(Args)]
pub struct FundingPlanArgs {
    /// Path to JSON input file with own funds, bank loans and private borrowing
    #[arg(long)]
    pub input: Option<String>,

    /// Print the bank and private loan principals implied by the plan instead
    #[arg(long)]
    pub loan_principals: bool,
}

pub fn run_funding_plan(args: FundingPlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: FundingPlanInput = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for the funding plan")?;

    if args.loan_principals {
        plan_input.validate()?;
        return Ok(serde_json::to_value(plan::loan_principals_from_plan(
            &plan_input,
        ))?);
    }

    let result = plan::build_funding_plan(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}
