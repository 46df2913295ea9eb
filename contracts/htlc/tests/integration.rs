//! HTLC integration tests against the token engine.

use common::{sha256, ExtendedAsset, ExtendedSymbolCode, Opt, NULL_ACCOUNT};
use cosmwasm_std::{Addr, Empty, HexBinary};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use gxc_htlc::msg::{ExecuteMsg, InstantiateMsg, LockResponse, QueryMsg, Recipient};
use gxc_token::msg::{
    AccountResponse, ExecuteMsg as TokenMsg, InstantiateMsg as TokenInit, QueryMsg as TokenQuery,
    StatResponse,
};

const VAULT: &str = "gxc.vault";
const PREIMAGE: [u8; 32] = [9u8; 32];

fn contract_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            gxc_token::contract::execute,
            gxc_token::contract::instantiate,
            gxc_token::contract::query,
        )
        .with_sudo(gxc_token::contract::sudo)
        .with_reply(gxc_token::contract::reply),
    )
}

fn contract_htlc() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        gxc_htlc::contract::execute,
        gxc_htlc::contract::instantiate,
        gxc_htlc::contract::query,
    ))
}

struct TestEnv {
    app: App,
    token: Addr,
    htlc: Addr,
}

fn asset(s: &str) -> ExtendedAsset {
    s.parse().unwrap()
}

fn exec_token(env: &mut TestEnv, sender: &str, msg: TokenMsg) {
    env.app
        .execute_contract(Addr::unchecked(sender), env.token.clone(), &msg, &[])
        .unwrap();
}

fn exec_htlc(env: &mut TestEnv, sender: &str, msg: &ExecuteMsg) -> Result<AppResponse, String> {
    env.app
        .execute_contract(Addr::unchecked(sender), env.htlc.clone(), msg, &[])
        .map_err(|err| err.root_cause().to_string())
}

fn balance(env: &TestEnv, owner: &str) -> String {
    let row: Option<AccountResponse> = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &TokenQuery::Account {
                owner: owner.to_string(),
                symbol: ExtendedSymbolCode::new("GXC", "gxcsys"),
            },
        )
        .unwrap();
    row.map(|row| row.balance.to_string()).unwrap_or_default()
}

fn supply(env: &TestEnv) -> String {
    let stat: StatResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &TokenQuery::Stat {
                symbol: ExtendedSymbolCode::new("GXC", "gxcsys"),
            },
        )
        .unwrap();
    stat.supply.to_string()
}

fn lock(env: &TestEnv, owner: &str) -> Option<LockResponse> {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.htlc,
            &QueryMsg::Lock {
                owner: owner.to_string(),
                contract_name: "swap".to_string(),
            },
        )
        .unwrap()
}

fn new_contract(env: &mut TestEnv, owner: &str, recipient: Recipient, value: &str) -> Result<AppResponse, String> {
    let timelock = env.app.block_info().time.plus_seconds(600);
    exec_htlc(
        env,
        owner,
        &ExecuteMsg::NewContract {
            owner: owner.to_string(),
            contract_name: "swap".to_string(),
            recipient,
            value: asset(value),
            hashlock: HexBinary::from(sha256(&PREIMAGE)),
            timelock,
        },
    )
}

fn withdraw(env: &mut TestEnv, owner: &str, preimage: &[u8]) -> Result<AppResponse, String> {
    exec_htlc(
        env,
        "relayer",
        &ExecuteMsg::Withdraw {
            owner: owner.to_string(),
            contract_name: "swap".to_string(),
            preimage: HexBinary::from(preimage),
        },
    )
}

/// GXC@gxcsys with 100.0000 held by conr2d; gxcsys lets the HTLC issue.
fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("admin");

    let token_code = app.store_code(contract_token());
    let htlc_code = app.store_code(contract_htlc());
    let token = app
        .instantiate_contract(
            token_code,
            admin.clone(),
            &TokenInit {
                admin: admin.to_string(),
            },
            &[],
            "gxc-token",
            None,
        )
        .unwrap();
    let htlc = app
        .instantiate_contract(
            htlc_code,
            admin,
            &InstantiateMsg {
                token: token.to_string(),
                vault: None,
            },
            &[],
            "gxc-htlc",
            None,
        )
        .unwrap();

    let mut env = TestEnv { app, token, htlc };
    let htlc_addr = env.htlc.to_string();
    exec_token(
        &mut env,
        "admin",
        TokenMsg::Mint {
            value: asset("1000000.0000 GXC@gxcsys"),
            opts: vec![Opt::flag("recallable", false)],
        },
    );
    exec_token(
        &mut env,
        "gxcsys",
        TokenMsg::Transfer {
            from: NULL_ACCOUNT.to_string(),
            to: "conr2d".to_string(),
            value: asset("100.0000 GXC@gxcsys"),
            memo: String::new(),
        },
    );
    exec_token(
        &mut env,
        "gxcsys",
        TokenMsg::LinkCode {
            account: "gxcsys".to_string(),
            code: htlc_addr,
        },
    );
    env
}

fn approve_htlc(env: &mut TestEnv, owner: &str, value: &str) {
    let htlc = env.htlc.to_string();
    exec_token(
        env,
        owner,
        TokenMsg::Approve {
            owner: owner.to_string(),
            spender: htlc,
            value: asset(value),
            count: None,
        },
    );
}

#[test]
fn test_outbound_swap_retires_escrow() {
    let mut env = setup();
    approve_htlc(&mut env, "conr2d", "40.0000 GXC@gxcsys");
    let recipient = Recipient::Address(HexBinary::from(vec![0x5a; 20]));
    new_contract(&mut env, "conr2d", recipient, "40.0000 GXC@gxcsys").unwrap();

    assert_eq!(balance(&env, "conr2d"), "60.0000 GXC");
    assert_eq!(balance(&env, env.htlc.as_str()), "40.0000 GXC");
    assert_eq!(
        new_contract(
            &mut env,
            "conr2d",
            Recipient::Address(HexBinary::from(vec![0x5a; 20])),
            "1.0000 GXC@gxcsys"
        )
        .unwrap_err(),
        "existing contract name"
    );

    assert_eq!(withdraw(&mut env, "conr2d", &[1u8; 32]).unwrap_err(), "invalid preimage");
    withdraw(&mut env, "conr2d", &PREIMAGE).unwrap();

    assert!(lock(&env, "conr2d").is_none());
    assert_eq!(balance(&env, env.htlc.as_str()), "");
    assert_eq!(supply(&env), "60.0000 GXC");
}

#[test]
fn test_inbound_swap_issues_to_recipient() {
    let mut env = setup();
    new_contract(
        &mut env,
        VAULT,
        Recipient::Name("eun2ce".to_string()),
        "25.0000 GXC@gxcsys",
    )
    .unwrap();

    let found = lock(&env, VAULT).unwrap();
    assert_eq!(found.recipient, Recipient::Name("eun2ce".to_string()));
    assert_eq!(found.value.to_string(), "25.0000 GXC@gxcsys");

    withdraw(&mut env, VAULT, &PREIMAGE).unwrap();
    assert_eq!(balance(&env, "eun2ce"), "25.0000 GXC");
    assert_eq!(supply(&env), "125.0000 GXC");
}

#[test]
fn test_expired_lock_refunds_owner() {
    let mut env = setup();
    approve_htlc(&mut env, "conr2d", "40.0000 GXC@gxcsys");
    let recipient = Recipient::Address(HexBinary::from(vec![0x5a; 20]));
    new_contract(&mut env, "conr2d", recipient, "40.0000 GXC@gxcsys").unwrap();

    let refund = ExecuteMsg::Refund {
        owner: "conr2d".to_string(),
        contract_name: "swap".to_string(),
    };
    assert_eq!(
        exec_htlc(&mut env, "conr2d", &refund).unwrap_err(),
        "contract not expired"
    );

    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(601);
    });
    assert_eq!(
        withdraw(&mut env, "conr2d", &PREIMAGE).unwrap_err(),
        "contract is expired"
    );
    exec_htlc(&mut env, "relayer", &refund).unwrap();

    assert_eq!(balance(&env, "conr2d"), "100.0000 GXC");
    assert_eq!(supply(&env), "100.0000 GXC");
    assert!(lock(&env, "conr2d").is_none());
}
