//! Gacha integration tests against the token engine and the account
//! registry.
//!
//! eun2ce is a partner running schemes paid in ENC@eun2ce; conr2d and
//! bob.x hold the draws.

use common::{sha256, ExtendedAsset, ExtendedSymbolCode, Opt, SudoMsg, NULL_ACCOUNT};
use cosmwasm_std::{Addr, Empty, HexBinary, Timestamp};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use gxc_account::msg::{ExecuteMsg as AccountMsg, InstantiateMsg as AccountInit};
use gxc_gacha::msg::{
    DrawResponse, DrawsResponse, ExecuteMsg, Grade, InstantiateMsg, QueryMsg, ScheduleResponse,
    SchemeName, SchemeResponse,
};
use gxc_token::msg::{
    AccountResponse, ExecuteMsg as TokenMsg, InstantiateMsg as TokenInit, QueryMsg as TokenQuery,
};

const DSEED: &str = "4c519413ac98e5ead1c3b412e5d053ba0d57245e7689e6fcbe6dd9b81aa88dd7";
const OSEED: &str = "1ba0668f40b6fdd0a2b553a8e5dfe57ee977506532ba437f31f1b72abc199dbe";

// ============================================================================
// Test Setup
// ============================================================================

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

fn contract_account() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        gxc_account::contract::execute,
        gxc_account::contract::instantiate,
        gxc_account::contract::query,
    ))
}

fn contract_gacha() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            gxc_gacha::contract::execute,
            gxc_gacha::contract::instantiate,
            gxc_gacha::contract::query,
        )
        .with_sudo(gxc_gacha::contract::sudo)
        .with_reply(gxc_gacha::contract::reply),
    )
}

struct TestEnv {
    app: App,
    token: Addr,
    gacha: Addr,
}

/// Seeds of the i-th test draw: (dseed, dseedhash, oseed).
fn seeds(i: u8) -> (HexBinary, HexBinary, HexBinary) {
    let dseed = sha256(&[i; 32]);
    let oseed = sha256(&[100 + i; 32]);
    (
        HexBinary::from(dseed),
        HexBinary::from(sha256(&dseed)),
        HexBinary::from(oseed),
    )
}

fn from_hex(s: &str) -> HexBinary {
    HexBinary::from_hex(s).unwrap()
}

fn asset(s: &str) -> ExtendedAsset {
    s.parse().unwrap()
}

fn scheme(name: &str) -> SchemeName {
    SchemeName {
        contract: "eun2ce".to_string(),
        name: name.to_string(),
    }
}

fn grade(reward: &str, score: u32, limit: Option<u32>) -> Grade {
    Grade {
        reward: reward.parse().unwrap(),
        score,
        limit,
    }
}

fn now(env: &TestEnv) -> Timestamp {
    env.app.block_info().time
}

fn advance(env: &mut TestEnv, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
    });
}

fn exec_token(env: &mut TestEnv, sender: &str, msg: TokenMsg) {
    env.app
        .execute_contract(Addr::unchecked(sender), env.token.clone(), &msg, &[])
        .unwrap();
}

fn exec_gacha(env: &mut TestEnv, sender: &str, msg: &ExecuteMsg) -> Result<AppResponse, String> {
    env.app
        .execute_contract(Addr::unchecked(sender), env.gacha.clone(), msg, &[])
        .map_err(|err| err.root_cause().to_string())
}

fn open(
    env: &mut TestEnv,
    name: &str,
    budget: &str,
    grades: Vec<Grade>,
    deadline_sec: Option<u64>,
) -> Result<AppResponse, String> {
    let gacha = env.gacha.to_string();
    exec_token(
        env,
        "eun2ce",
        TokenMsg::Approve {
            owner: "eun2ce".to_string(),
            spender: gacha,
            value: asset(budget),
            count: None,
        },
    );
    let expiration = now(env).plus_seconds(3600);
    exec_gacha(
        env,
        "eun2ce",
        &ExecuteMsg::Open {
            scheme: scheme(name),
            grades,
            budget: asset(budget),
            expiration,
            precision: None,
            deadline_sec,
        },
    )
}

fn issue(env: &mut TestEnv, name: &str, to: &str, id: u64, seed: u8) -> Result<AppResponse, String> {
    exec_gacha(
        env,
        "eun2ce",
        &ExecuteMsg::Issue {
            to: to.to_string(),
            scheme: scheme(name),
            dseedhash: seeds(seed).1,
            id: Some(id),
        },
    )
}

fn set_oseed(env: &mut TestEnv, owner: &str, id: u64, seed: u8) -> Result<AppResponse, String> {
    exec_gacha(
        env,
        owner,
        &ExecuteMsg::SetOseed {
            id,
            oseed: seeds(seed).2,
        },
    )
}

fn set_dseed(env: &mut TestEnv, id: u64, seed: u8) -> Result<AppResponse, String> {
    exec_gacha(
        env,
        "eun2ce",
        &ExecuteMsg::SetDseed {
            id,
            dseed: seeds(seed).0,
        },
    )
}

/// Issue, seed and reveal one draw.
fn play(env: &mut TestEnv, name: &str, owner: &str, id: u64, seed: u8) -> AppResponse {
    issue(env, name, owner, id, seed).unwrap();
    set_oseed(env, owner, id, seed).unwrap();
    set_dseed(env, id, seed).unwrap()
}

fn balance(env: &TestEnv, owner: &str) -> String {
    let row: Option<AccountResponse> = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &TokenQuery::Account {
                owner: owner.to_string(),
                symbol: ExtendedSymbolCode::new("ENC", "eun2ce"),
            },
        )
        .unwrap();
    row.map(|row| row.balance.to_string()).unwrap_or_default()
}

fn query_scheme(env: &TestEnv, name: &str) -> Option<SchemeResponse> {
    env.app
        .wrap()
        .query_wasm_smart(&env.gacha, &QueryMsg::Scheme { scheme: scheme(name) })
        .unwrap()
}

fn query_draw(env: &TestEnv, id: u64) -> Option<DrawResponse> {
    env.app
        .wrap()
        .query_wasm_smart(&env.gacha, &QueryMsg::Draw { id })
        .unwrap()
}

fn schedule(env: &TestEnv) -> ScheduleResponse {
    env.app
        .wrap()
        .query_wasm_smart(&env.gacha, &QueryMsg::Schedule {})
        .unwrap()
}

fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|event| event.ty == ty)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}

/// eun2ce is a partner holding 10000.00 ENC; conr2d is registered but not a
/// partner.
fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("admin");

    let token_code = app.store_code(contract_token());
    let account_code = app.store_code(contract_account());
    let gacha_code = app.store_code(contract_gacha());

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
    let account = app
        .instantiate_contract(
            account_code,
            admin.clone(),
            &AccountInit {
                admin: admin.to_string(),
            },
            &[],
            "gxc-account",
            None,
        )
        .unwrap();
    let gacha = app
        .instantiate_contract(
            gacha_code,
            admin.clone(),
            &InstantiateMsg {
                token: token.to_string(),
                account: account.to_string(),
            },
            &[],
            "gxc-gacha",
            None,
        )
        .unwrap();

    for msg in [
        AccountMsg::SetNick {
            name: "eun2ce".to_string(),
            nickname: "eun2ce01".to_string(),
        },
        AccountMsg::SetNick {
            name: "conr2d".to_string(),
            nickname: "conr2d01".to_string(),
        },
        AccountMsg::SetPartner {
            name: "eun2ce".to_string(),
            value: true,
        },
    ] {
        app.execute_contract(admin.clone(), account.clone(), &msg, &[])
            .unwrap();
    }

    let mut env = TestEnv { app, token, gacha };
    exec_token(
        &mut env,
        "admin",
        TokenMsg::Mint {
            value: asset("100000.00 ENC@eun2ce"),
            opts: vec![Opt::flag("recallable", false)],
        },
    );
    exec_token(
        &mut env,
        "eun2ce",
        TokenMsg::Transfer {
            from: NULL_ACCOUNT.to_string(),
            to: "eun2ce".to_string(),
            value: asset("10000.00 ENC@eun2ce"),
            memo: String::new(),
        },
    );
    env
}

// ============================================================================
// Draws
// ============================================================================

#[test]
fn test_single_grade_draw_pays_whole_budget() {
    let mut env = setup();
    open(
        &mut env,
        "hello",
        "5000.00 ENC@eun2ce",
        vec![grade("5000.00 ENC", 1, Some(0))],
        None,
    )
    .unwrap();
    assert_eq!(balance(&env, "eun2ce"), "5000.00 ENC");
    assert_eq!(balance(&env, env.gacha.as_str()), "5000.00 ENC");

    exec_gacha(
        &mut env,
        "eun2ce",
        &ExecuteMsg::Issue {
            to: "conr2d".to_string(),
            scheme: scheme("hello"),
            dseedhash: HexBinary::from(sha256(&from_hex(DSEED))),
            id: None,
        },
    )
    .unwrap();

    let owned: DrawsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.gacha,
            &QueryMsg::DrawsByOwner {
                owner: "conr2d".to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(owned.draws.len(), 1);
    let id = owned.draws[0].id;

    exec_gacha(
        &mut env,
        "conr2d",
        &ExecuteMsg::SetOseed {
            id,
            oseed: from_hex(OSEED),
        },
    )
    .unwrap();
    let deadline = now(&env).plus_seconds(7 * 24 * 60 * 60).seconds();
    assert_eq!(query_draw(&env, id).unwrap().deadline.unwrap().seconds(), deadline);
    assert_eq!(schedule(&env).due, Some(deadline));

    let res = exec_gacha(
        &mut env,
        "eun2ce",
        &ExecuteMsg::SetDseed {
            id,
            dseed: from_hex(DSEED),
        },
    )
    .unwrap();
    assert_eq!(event_attr(&res, "wasm-winreward", "score").as_deref(), Some("254"));
    assert_eq!(
        event_attr(&res, "wasm-winreward", "value").as_deref(),
        Some("5000.00 ENC@eun2ce")
    );

    let found = query_scheme(&env, "hello").unwrap();
    assert_eq!(found.out.to_string(), "5000.00 ENC");
    assert_eq!(found.out_count, vec![1]);
    assert_eq!(found.unresolved, 0);
    assert_eq!(found.issued, 1);
    assert_eq!(balance(&env, "conr2d"), "5000.00 ENC");
    assert_eq!(balance(&env, env.gacha.as_str()), "");

    assert!(query_draw(&env, id).is_none());
    assert_eq!(schedule(&env).due, None);

    // nothing left to give away
    assert_eq!(
        issue(&mut env, "hello", "conr2d", 9, 9).unwrap_err(),
        "budget exhausted"
    );
}

#[test]
fn test_grades_respect_limits() {
    let mut env = setup();
    open(
        &mut env,
        "ladder",
        "300.00 ENC@eun2ce",
        vec![
            grade("100.00 ENC", 200, Some(1)),
            grade("10.00 ENC", 100, None),
            grade("1.00 ENC", 0, None),
        ],
        None,
    )
    .unwrap();

    // seeds 3 and 6 both score above 200, seed 4 scores 47
    let res = play(&mut env, "ladder", "conr2d", 1, 3);
    assert_eq!(event_attr(&res, "wasm-winreward", "score").as_deref(), Some("229"));
    let res = play(&mut env, "ladder", "conr2d", 2, 6);
    assert_eq!(
        event_attr(&res, "wasm-winreward", "value").as_deref(),
        Some("10.00 ENC@eun2ce")
    );
    play(&mut env, "ladder", "conr2d", 3, 4);

    let found = query_scheme(&env, "ladder").unwrap();
    assert_eq!(found.out.to_string(), "111.00 ENC");
    assert_eq!(found.out_count, vec![1, 1, 1]);
    assert_eq!(found.issued, 3);
    assert_eq!(balance(&env, "conr2d"), "111.00 ENC");
    assert_eq!(balance(&env, env.gacha.as_str()), "189.00 ENC");
}

#[test]
fn test_missed_grade_is_raincheck() {
    let mut env = setup();
    open(
        &mut env,
        "rare",
        "100.00 ENC@eun2ce",
        vec![grade("100.00 ENC", 250, None)],
        None,
    )
    .unwrap();

    // seed 1 scores 121
    let res = play(&mut env, "rare", "conr2d", 1, 1);
    assert_eq!(event_attr(&res, "wasm-raincheck", "score").as_deref(), Some("121"));
    assert!(event_attr(&res, "wasm-winreward", "score").is_none());

    let found = query_scheme(&env, "rare").unwrap();
    assert_eq!(found.out.to_string(), "0.00 ENC");
    assert_eq!(found.unresolved, 0);
    assert!(query_draw(&env, 1).is_none());
}

#[test]
fn test_draw_errors() {
    let mut env = setup();
    open(
        &mut env,
        "hello",
        "100.00 ENC@eun2ce",
        vec![grade("1.00 ENC", 0, None)],
        None,
    )
    .unwrap();

    assert_eq!(
        issue(&mut env, "nothing", "conr2d", 1, 1).unwrap_err(),
        "scheme not found"
    );
    let err = exec_gacha(
        &mut env,
        "conr2d",
        &ExecuteMsg::Issue {
            to: "conr2d".to_string(),
            scheme: scheme("hello"),
            dseedhash: seeds(1).1,
            id: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, "missing required authority");

    issue(&mut env, "hello", "conr2d", 1, 1).unwrap();
    assert_eq!(
        issue(&mut env, "hello", "conr2d", 1, 2).unwrap_err(),
        "existing gacha"
    );

    assert_eq!(set_dseed(&mut env, 1, 1).unwrap_err(), "oseed is not set");
    assert_eq!(
        set_oseed(&mut env, "eun2ce", 1, 1).unwrap_err(),
        "missing required authority"
    );
    set_oseed(&mut env, "conr2d", 1, 1).unwrap();
    assert_eq!(
        set_oseed(&mut env, "conr2d", 1, 1).unwrap_err(),
        "oseed is already set"
    );

    // revealing someone else's seed breaks the commitment
    assert_eq!(set_dseed(&mut env, 1, 2).unwrap_err(), "hash mismatch");
    let err = exec_gacha(
        &mut env,
        "conr2d",
        &ExecuteMsg::SetDseed {
            id: 1,
            dseed: seeds(1).0,
        },
    )
    .unwrap_err();
    assert_eq!(err, "missing required authority");
    assert_eq!(
        exec_gacha(&mut env, "eun2ce", &ExecuteMsg::Resolve {}).unwrap_err(),
        "missing required authority"
    );

    assert_eq!(set_dseed(&mut env, 7, 1).unwrap_err(), "gacha not found");
    set_dseed(&mut env, 1, 1).unwrap();
}

#[test]
fn test_budget_exceeded_blocks_reveal() {
    let mut env = setup();
    open(
        &mut env,
        "tight",
        "150.00 ENC@eun2ce",
        vec![grade("100.00 ENC", 0, None)],
        Some(60),
    )
    .unwrap();

    issue(&mut env, "tight", "conr2d", 1, 1).unwrap();
    issue(&mut env, "tight", "conr2d", 2, 2).unwrap();
    set_oseed(&mut env, "conr2d", 1, 1).unwrap();
    set_oseed(&mut env, "conr2d", 2, 2).unwrap();
    set_dseed(&mut env, 1, 1).unwrap();
    assert_eq!(set_dseed(&mut env, 2, 2).unwrap_err(), "budget exceeded");

    // the stuck draw still rainchecks at its deadline
    advance(&mut env, 60);
    let res = env.app.wasm_sudo(env.gacha.clone(), &SudoMsg::Tick {}).unwrap();
    assert_eq!(event_attr(&res, "wasm-raincheck", "id").as_deref(), Some("2"));

    let found = query_scheme(&env, "tight").unwrap();
    assert_eq!(found.out.to_string(), "100.00 ENC");
    assert_eq!(found.unresolved, 0);
}

// ============================================================================
// Deadlines
// ============================================================================

#[test]
fn test_deadline_resolves_as_raincheck() {
    let mut env = setup();
    open(
        &mut env,
        "hello",
        "100.00 ENC@eun2ce",
        vec![grade("1.00 ENC", 0, None)],
        Some(60),
    )
    .unwrap();

    issue(&mut env, "hello", "conr2d", 1, 1).unwrap();
    issue(&mut env, "hello", "conr2d", 2, 2).unwrap();
    set_oseed(&mut env, "conr2d", 1, 1).unwrap();
    advance(&mut env, 30);
    set_oseed(&mut env, "conr2d", 2, 2).unwrap();

    let first = now(&env).plus_seconds(30).seconds();
    assert_eq!(schedule(&env).due, Some(first));
    assert_eq!(query_scheme(&env, "hello").unwrap().unresolved, 2);

    // not due yet
    env.app.wasm_sudo(env.gacha.clone(), &SudoMsg::Tick {}).unwrap();
    assert!(query_draw(&env, 1).is_some());

    advance(&mut env, 30);
    let res = env.app.wasm_sudo(env.gacha.clone(), &SudoMsg::Tick {}).unwrap();
    assert_eq!(event_attr(&res, "wasm-raincheck", "id").as_deref(), Some("1"));
    assert_eq!(event_attr(&res, "wasm-raincheck", "score").as_deref(), Some("-1"));
    assert!(query_draw(&env, 1).is_none());

    // the timer moved on to the second draw
    let second = query_draw(&env, 2).unwrap().deadline.unwrap().seconds();
    assert_eq!(schedule(&env).due, Some(second));
    assert_eq!(query_scheme(&env, "hello").unwrap().unresolved, 1);

    // a reveal still counts until the resolve call runs
    advance(&mut env, 30);
    let res = set_dseed(&mut env, 2, 2).unwrap();
    assert_eq!(event_attr(&res, "wasm-winreward", "id").as_deref(), Some("2"));
    let found = query_scheme(&env, "hello").unwrap();
    assert_eq!(found.out.to_string(), "1.00 ENC");
    assert_eq!(found.unresolved, 0);
    assert_eq!(schedule(&env).due, None);
}

#[test]
fn test_seeding_past_deadline_resolves_inline() {
    let mut env = setup();
    open(
        &mut env,
        "instant",
        "100.00 ENC@eun2ce",
        vec![grade("1.00 ENC", 0, None)],
        Some(0),
    )
    .unwrap();

    issue(&mut env, "instant", "conr2d", 1, 1).unwrap();
    let res = set_oseed(&mut env, "conr2d", 1, 1).unwrap();
    assert_eq!(event_attr(&res, "wasm-raincheck", "id").as_deref(), Some("1"));
    assert!(query_draw(&env, 1).is_none());
    assert_eq!(query_scheme(&env, "instant").unwrap().unresolved, 0);
}

// ============================================================================
// Schemes
// ============================================================================

#[test]
fn test_open_errors() {
    let mut env = setup();
    let gacha = env.gacha.to_string();
    exec_token(
        &mut env,
        "eun2ce",
        TokenMsg::Approve {
            owner: "eun2ce".to_string(),
            spender: gacha,
            value: asset("100.00 ENC@eun2ce"),
            count: None,
        },
    );
    let expiration = now(&env).plus_seconds(3600);
    let open_msg = |contract: &str, grades: Vec<Grade>, precision: Option<u8>| ExecuteMsg::Open {
        scheme: SchemeName {
            contract: contract.to_string(),
            name: "hello".to_string(),
        },
        grades,
        budget: asset("100.00 ENC@eun2ce"),
        expiration,
        precision,
        deadline_sec: None,
    };

    let err = exec_gacha(
        &mut env,
        "conr2d",
        &open_msg("conr2d", vec![grade("1.00 ENC", 0, None)], None),
    )
    .unwrap_err();
    assert_eq!(err, "only partner account can create scheme");

    let err = exec_gacha(
        &mut env,
        "conr2d",
        &open_msg("eun2ce", vec![grade("1.00 ENC", 0, None)], None),
    )
    .unwrap_err();
    assert_eq!(err, "missing required authority");

    let err = exec_gacha(
        &mut env,
        "eun2ce",
        &open_msg(
            "eun2ce",
            vec![grade("1.00 ENC", 0, None), grade("2.00 ENC", 10, None)],
            None,
        ),
    )
    .unwrap_err();
    assert_eq!(err, "grades should be sorted in descending order by score");

    let err = exec_gacha(
        &mut env,
        "eun2ce",
        &open_msg("eun2ce", vec![grade("1.00 ENC", 0, None)], Some(5)),
    )
    .unwrap_err();
    assert_eq!(err, "precision cannot exceed 4 bytes");

    // a sub-account scheme is run by its root
    exec_gacha(
        &mut env,
        "eun2ce",
        &open_msg("eun2ce.event", vec![grade("1.00 ENC", 0, None)], Some(4)),
    )
    .unwrap();
    let found: Option<SchemeResponse> = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.gacha,
            &QueryMsg::Scheme {
                scheme: SchemeName {
                    contract: "eun2ce.event".to_string(),
                    name: "hello".to_string(),
                },
            },
        )
        .unwrap();
    assert_eq!(found.unwrap().precision, 4);

    open(
        &mut env,
        "hello",
        "100.00 ENC@eun2ce",
        vec![grade("1.00 ENC", 0, None)],
        None,
    )
    .unwrap();
    let err = open(
        &mut env,
        "hello",
        "100.00 ENC@eun2ce",
        vec![grade("1.00 ENC", 0, None)],
        None,
    )
    .unwrap_err();
    assert_eq!(err, "existing scheme name");
}

#[test]
fn test_close_refunds_unspent_budget() {
    let mut env = setup();
    open(
        &mut env,
        "hello",
        "300.00 ENC@eun2ce",
        vec![grade("100.00 ENC", 0, None)],
        None,
    )
    .unwrap();
    play(&mut env, "hello", "conr2d", 1, 1);
    issue(&mut env, "hello", "conr2d", 2, 2).unwrap();
    set_oseed(&mut env, "conr2d", 2, 2).unwrap();

    let close = ExecuteMsg::Close {
        scheme: scheme("hello"),
    };
    assert_eq!(
        exec_gacha(&mut env, "eun2ce", &close).unwrap_err(),
        "not expired gacha cannot be closed"
    );

    advance(&mut env, 3601);
    assert_eq!(
        issue(&mut env, "hello", "conr2d", 3, 3).unwrap_err(),
        "scheme expired"
    );
    assert_eq!(
        exec_gacha(&mut env, "conr2d", &close).unwrap_err(),
        "missing required authority"
    );
    assert_eq!(
        exec_gacha(&mut env, "eun2ce", &close).unwrap_err(),
        "unresolved gacha remains"
    );

    set_dseed(&mut env, 2, 2).unwrap();
    let res = exec_gacha(&mut env, "eun2ce", &close).unwrap();
    assert_eq!(
        event_attr(&res, "wasm", "refund").as_deref(),
        Some("100.00 ENC")
    );

    assert!(query_scheme(&env, "hello").is_none());
    assert_eq!(balance(&env, "eun2ce"), "9800.00 ENC");
    assert_eq!(balance(&env, "conr2d"), "200.00 ENC");
    assert_eq!(balance(&env, env.gacha.as_str()), "");
}
