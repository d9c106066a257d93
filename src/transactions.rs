use std::fmt;
use anyhow::{anyhow, Result};
use sui_sdk::types::{
    base_types::{ObjectID, SuiAddress},
    programmable_transaction_builder::ProgrammableTransactionBuilder,
    Identifier,
};
use sui_types::transaction::{Argument, CallArg, Command, ProgrammableTransaction};
use crate::constants::{
    CHANGE_OWNER_FUNCTION,
    RESET_STATS_FUNCTION,
    SEND_TIP_FUNCTION,
    TIP_JAR_MODULE,
};
use crate::wallet::{AssetRecord, TipAmount};

/// The user facing operation a plan performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipJarAction {
    SendTip,
    ResetStats,
    ChangeOwner,
}

impl fmt::Display for TipJarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TipJarAction::SendTip => "send tip",
            TipJarAction::ResetStats => "reset stats",
            TipJarAction::ChangeOwner => "change owner",
        };
        f.write_str(name)
    }
}

/// Transaction input before object versions are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanInput {
    SharedObject { id: ObjectID, mutable: bool },
    OwnedObject(ObjectID),
    PureU64(u64),
    PureAddress(SuiAddress),
}

impl PlanInput {
    pub fn object_id(&self) -> Option<ObjectID> {
        match self {
            PlanInput::SharedObject { id, .. } | PlanInput::OwnedObject(id) => Some(*id),
            _ => None,
        }
    }

    /// BCS encoded argument for pure inputs, `None` for objects
    pub fn pure_call_arg(&self) -> Result<Option<CallArg>> {
        let bytes = match self {
            PlanInput::PureU64(value) => bcs::to_bytes(value)?,
            PlanInput::PureAddress(address) => bcs::to_bytes(address)?,
            _ => return Ok(None),
        };
        Ok(Some(CallArg::Pure(bytes)))
    }
}

/// `Argument::Input(i)` refers to `inputs[i]` of the plan, results refer to
/// earlier commands of the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanCommand {
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },
    MoveCall {
        package: ObjectID,
        module: &'static str,
        function: &'static str,
        arguments: Vec<Argument>,
    },
}

/// Ordered commands executed atomically in one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPlan {
    action: TipJarAction,
    inputs: Vec<PlanInput>,
    commands: Vec<PlanCommand>,
}

impl TransactionPlan {
    fn new(action: TipJarAction) -> Self {
        Self {
            action,
            inputs: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn input(&mut self, input: PlanInput) -> Argument {
        self.inputs.push(input);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    fn command(&mut self, command: PlanCommand) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }

    pub fn action(&self) -> TipJarAction {
        self.action
    }

    pub fn inputs(&self) -> &[PlanInput] {
        &self.inputs
    }

    pub fn commands(&self) -> &[PlanCommand] {
        &self.commands
    }

    /// Objects the plan touches; these can't double as gas
    pub fn object_ids(&self) -> Vec<ObjectID> {
        self.inputs.iter().filter_map(PlanInput::object_id).collect()
    }

    /// Owned coin the plan splits from, with the total it splits off
    pub fn split_source(&self) -> Option<(ObjectID, u64)> {
        self.commands.iter().find_map(|command| {
            let PlanCommand::SplitCoins { coin: Argument::Input(i), amounts } = command else {
                return None;
            };
            let PlanInput::OwnedObject(id) = self.inputs.get(*i as usize)? else {
                return None;
            };
            let total = amounts.iter().try_fold(0u64, |total, amount| match amount {
                Argument::Input(j) => match self.inputs.get(*j as usize)? {
                    PlanInput::PureU64(value) => total.checked_add(*value),
                    _ => None,
                },
                _ => None,
            })?;
            Some((*id, total))
        })
    }

    /// Drop `coin` from the inputs and spend from the gas coin instead.
    /// Only valid when the gas coin is that same object.
    pub fn pay_from_gas(mut self, coin: ObjectID) -> Option<Self> {
        let removed = self.inputs.iter().position(|input| *input == PlanInput::OwnedObject(coin))?;
        self.inputs.remove(removed);
        let removed = removed as u16;

        let remap = |arg: &mut Argument| match *arg {
            Argument::Input(i) if i == removed => *arg = Argument::GasCoin,
            Argument::Input(i) if i > removed => *arg = Argument::Input(i - 1),
            _ => {}
        };
        for command in &mut self.commands {
            match command {
                PlanCommand::SplitCoins { coin, amounts } => {
                    remap(coin);
                    amounts.iter_mut().for_each(remap);
                }
                PlanCommand::MoveCall { arguments, .. } => arguments.iter_mut().for_each(remap),
            }
        }
        Some(self)
    }

    /// Lower into a Sui programmable transaction. `call_args` must line up
    /// with [`inputs`](Self::inputs).
    pub fn into_programmable(self, call_args: Vec<CallArg>) -> Result<ProgrammableTransaction> {
        if call_args.len() != self.inputs.len() {
            return Err(anyhow!(
                "expected {} resolved inputs, got {}",
                self.inputs.len(),
                call_args.len()
            ));
        }

        let mut ptb = ProgrammableTransactionBuilder::new();
        let mut input_args = Vec::with_capacity(call_args.len());
        for arg in call_args {
            input_args.push(ptb.input(arg)?);
        }

        let remap = |arg: Argument| -> Result<Argument> {
            match arg {
                Argument::Input(index) => input_args
                    .get(index as usize)
                    .copied()
                    .ok_or_else(|| anyhow!("plan references missing input {}", index)),
                other => Ok(other),
            }
        };

        for command in self.commands {
            match command {
                PlanCommand::SplitCoins { coin, amounts } => {
                    let coin = remap(coin)?;
                    let amounts = amounts.into_iter().map(&remap).collect::<Result<Vec<_>>>()?;
                    ptb.command(Command::SplitCoins(coin, amounts));
                }
                PlanCommand::MoveCall { package, module, function, arguments } => {
                    let arguments = arguments.into_iter().map(&remap).collect::<Result<Vec<_>>>()?;
                    ptb.command(Command::move_call(
                        package,
                        Identifier::new(module)?,
                        Identifier::new(function)?,
                        vec![],
                        arguments,
                    ));
                }
            }
        }

        Ok(ptb.finish())
    }
}

/// Builds tip jar transactions for one deployment
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    package_id: ObjectID,
    tip_jar_id: ObjectID,
}

impl TransactionBuilder {
    pub fn new(package_id: ObjectID, tip_jar_id: ObjectID) -> Self {
        Self { package_id, tip_jar_id }
    }

    fn tip_jar_input(&self) -> PlanInput {
        PlanInput::SharedObject {
            id: self.tip_jar_id,
            mutable: true,
        }
    }

    fn tip_jar_call(&self, function: &'static str, arguments: Vec<Argument>) -> PlanCommand {
        PlanCommand::MoveCall {
            package: self.package_id,
            module: TIP_JAR_MODULE,
            function,
            arguments,
        }
    }

    /// Split exactly `amount` off `coin`, then hand the new coin to `send_tip`
    pub fn send_tip(&self, coin: &AssetRecord, amount: TipAmount) -> TransactionPlan {
        let mut plan = TransactionPlan::new(TipJarAction::SendTip);
        let tip_jar = plan.input(self.tip_jar_input());
        let source = plan.input(PlanInput::OwnedObject(coin.object_id));
        let amount = plan.input(PlanInput::PureU64(amount.mist()));

        let split = plan.command(PlanCommand::SplitCoins {
            coin: source,
            amounts: vec![amount],
        });
        plan.command(self.tip_jar_call(
            SEND_TIP_FUNCTION,
            vec![tip_jar, Argument::NestedResult(split, 0)],
        ));
        plan
    }

    pub fn reset_stats(&self) -> TransactionPlan {
        let mut plan = TransactionPlan::new(TipJarAction::ResetStats);
        let tip_jar = plan.input(self.tip_jar_input());
        plan.command(self.tip_jar_call(RESET_STATS_FUNCTION, vec![tip_jar]));
        plan
    }

    /// `new_owner` has already been normalized and parsed
    pub fn change_owner(&self, new_owner: SuiAddress) -> TransactionPlan {
        let mut plan = TransactionPlan::new(TipJarAction::ChangeOwner);
        let tip_jar = plan.input(self.tip_jar_input());
        let owner = plan.input(PlanInput::PureAddress(new_owner));
        plan.command(self.tip_jar_call(CHANGE_OWNER_FUNCTION, vec![tip_jar, owner]));
        plan
    }
}
