//! Account registry integration tests.

use cosmwasm_std::{Addr, Empty};
use cw_multi_test::{App, ContractWrapper, Executor};

use gxc_account::msg::{AccountResponse, ExecuteMsg, InstantiateMsg, IsPartnerResponse, QueryMsg};

fn contract_account() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        gxc_account::contract::execute,
        gxc_account::contract::instantiate,
        gxc_account::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    registry: Addr,
    admin: Addr,
    user: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("gxcadmin");
    let user = Addr::unchecked("eun2ce");

    let code_id = app.store_code(contract_account());
    let registry = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
            },
            &[],
            "gxc-account",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        registry,
        admin,
        user,
    }
}

fn set_nick(env: &mut TestEnv, sender: &Addr, name: &str, nickname: &str) -> Result<(), String> {
    env.app
        .execute_contract(
            sender.clone(),
            env.registry.clone(),
            &ExecuteMsg::SetNick {
                name: name.to_string(),
                nickname: nickname.to_string(),
            },
            &[],
        )
        .map(|_| ())
        .map_err(|err| err.root_cause().to_string())
}

#[test]
fn test_set_nick_once() {
    let mut env = setup();
    let user = env.user.clone();

    set_nick(&mut env, &user, "eun2ce", "eun2ce01").unwrap();

    let found: Option<AccountResponse> = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.registry,
            &QueryMsg::ByNickname {
                nickname: "eun2ce01".to_string(),
            },
        )
        .unwrap();
    assert_eq!(found.unwrap().name, "eun2ce");

    let err = set_nick(&mut env, &user, "eun2ce", "eun2ce02").unwrap_err();
    assert_eq!(err, "changing nickname not supported yet");

    // the system account may rename
    let admin = env.admin.clone();
    set_nick(&mut env, &admin, "eun2ce", "eun2ce02").unwrap();
    let found: Option<AccountResponse> = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.registry,
            &QueryMsg::ByNickname {
                nickname: "eun2ce01".to_string(),
            },
        )
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn test_set_nick_rejections() {
    let mut env = setup();
    let user = env.user.clone();
    let admin = env.admin.clone();

    assert_eq!(
        set_nick(&mut env, &user, "eun2ce", "short").unwrap_err(),
        "nickname has invalid length"
    );
    assert_eq!(
        set_nick(&mut env, &user, "eun2ce", "bad-name").unwrap_err(),
        "nickname contains invalid character"
    );
    assert_eq!(
        set_nick(&mut env, &user, "conr2d", "conr2d01").unwrap_err(),
        "missing required authority"
    );

    set_nick(&mut env, &admin, "conr2d", "taken001").unwrap();
    assert_eq!(
        set_nick(&mut env, &user, "eun2ce", "taken001").unwrap_err(),
        "nickname already taken"
    );
}

#[test]
fn test_set_partner() {
    let mut env = setup();
    let user = env.user.clone();
    let admin = env.admin.clone();

    let set_partner = |value| ExecuteMsg::SetPartner {
        name: "eun2ce".to_string(),
        value,
    };

    let res = env
        .app
        .execute_contract(admin.clone(), env.registry.clone(), &set_partner(true), &[]);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        "not registered account"
    );

    set_nick(&mut env, &user, "eun2ce", "eun2ce01").unwrap();

    let res = env
        .app
        .execute_contract(user, env.registry.clone(), &set_partner(true), &[]);
    assert!(res.is_err());

    env.app
        .execute_contract(admin.clone(), env.registry.clone(), &set_partner(true), &[])
        .unwrap();
    let res: IsPartnerResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.registry,
            &QueryMsg::IsPartner {
                name: "eun2ce".to_string(),
            },
        )
        .unwrap();
    assert!(res.is_partner);

    let res = env
        .app
        .execute_contract(admin, env.registry.clone(), &set_partner(true), &[]);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        "already set given value"
    );
}
