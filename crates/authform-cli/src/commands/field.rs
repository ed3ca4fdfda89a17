use anyhow::Result;
use authform_validation::{
    validate, Config, ConstraintSet, FieldConstraint, FieldDescriptor, FieldInput,
};

use super::print_verdict;

pub struct FieldArgs {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub constraints: Vec<String>,
    pub related: Option<String>,
}

pub fn execute(config: &Config, args: FieldArgs, json: bool) -> Result<bool> {
    let input = build_input(config, args);
    tracing::debug!(field = %input.identifier, constraints = ?input.constraints, "validating field");

    let result = validate(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_verdict(&input.identifier, &result);
    }

    Ok(result.is_valid())
}

fn build_input(config: &Config, args: FieldArgs) -> FieldInput {
    let descriptor = FieldDescriptor {
        name: args.name,
        id: String::new(),
        value: args.value,
        required: args.required,
    };

    let constraints = if args.constraints.is_empty() {
        config.naming.constraints_for(&descriptor)
    } else {
        let mut explicit = ConstraintSet::from_tags(&args.constraints);
        if args.required {
            explicit.insert(FieldConstraint::Required);
        }
        explicit
    };

    let mut input = FieldInput::new(descriptor.name, descriptor.value).with_constraints(constraints);
    if constraints.contains(FieldConstraint::PasswordConfirm) {
        input.related_value = args.related;
    }
    input
}
