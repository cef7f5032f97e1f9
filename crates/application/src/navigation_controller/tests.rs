use supplink_domain::{CapabilityTable, RequestFilter, Role, Screen};

use super::{IgnoreReason, NavigationCommand, NavigationController, Transition};

fn signed_in(role: Role) -> NavigationController {
    let mut controller = NavigationController::default();
    controller.login(role);
    controller
}

#[test]
fn starts_signed_out_on_sign_in() {
    let controller = NavigationController::default();
    assert_eq!(controller.current(), Screen::SignIn);
    assert_eq!(controller.state().previous(), None);
    assert_eq!(controller.role(), None);
}

#[test]
fn login_routes_each_role_to_its_home_screen() {
    let expected = [
        (Role::Requester, Screen::RequestsList),
        (Role::Approver, Screen::Dashboard),
        (Role::Manager, Screen::ManagerDashboard),
        (Role::Supplier, Screen::SupplierWelcome),
        (Role::Admin, Screen::Dashboard),
    ];

    for (role, home) in expected {
        let mut controller = NavigationController::default();
        let transition = controller.login(role);
        assert_eq!(
            transition,
            Transition::Moved {
                from: Screen::SignIn,
                to: home
            }
        );
        assert_eq!(controller.current(), home);
        assert_eq!(controller.state().previous(), None);
    }
}

#[test]
fn manager_review_round_trip_restores_dashboard() {
    let mut controller = NavigationController::default();
    controller.login(Role::Manager);
    assert_eq!(controller.current().as_str(), "ManagerDashboard");

    controller.navigate_to_request_review("req-1");
    assert_eq!(controller.current().as_str(), "RequestReview");
    assert_eq!(controller.state().previous(), Some(Screen::ManagerDashboard));
    assert_eq!(
        controller.state().context().review_request_id.as_deref(),
        Some("req-1")
    );

    controller.return_from_request_review();
    assert_eq!(controller.current(), Screen::ManagerDashboard);
    assert_eq!(controller.state().previous(), None);
}

#[test]
fn restore_flows_return_to_the_exact_prior_screen() {
    let mut controller = signed_in(Role::Manager);
    controller.open_requests_list(Some(RequestFilter::Pending));

    controller.navigate_to_request_review("req-7");
    controller.return_from_request_review();
    assert_eq!(controller.current(), Screen::RequestsList);

    controller.open_supplier_list();
    controller.navigate_to_supplier_detail("sup-1");
    controller.return_from_supplier_detail();
    assert_eq!(controller.current(), Screen::SupplierList);

    controller.open_request_detail("req-7");
    controller.navigate_to_supplier_invite(Some("req-7"));
    controller.return_from_supplier_invite();
    assert_eq!(controller.current(), Screen::RequestDetail);

    controller.open_dashboard();
    controller.navigate_to_epi_configuration();
    controller.return_from_epi_configuration();
    assert_eq!(controller.current(), Screen::ManagerDashboard);
    assert_eq!(controller.state().previous(), None);
}

#[test]
fn repeated_return_outside_the_flow_is_ignored() {
    let mut controller = signed_in(Role::Manager);
    controller.open_requests_list(None);
    controller.navigate_to_request_review("req-1");

    controller.return_from_request_review();
    assert_eq!(controller.current(), Screen::RequestsList);

    let before = controller.state().clone();
    assert_eq!(
        controller.return_from_request_review(),
        Transition::Ignored {
            target: Screen::ManagerDashboard,
            reason: IgnoreReason::OutsideFlow,
        }
    );
    assert_eq!(controller.state(), &before);
}

#[test]
fn return_does_not_consume_another_flows_pointer() {
    let mut controller = signed_in(Role::Manager);
    controller.open_supplier_list();
    controller.navigate_to_supplier_detail("sup-1");

    assert!(!controller.return_from_request_review().moved());
    assert_eq!(controller.current(), Screen::SupplierDetail);
    assert_eq!(controller.state().previous(), Some(Screen::SupplierList));

    controller.return_from_supplier_detail();
    assert_eq!(controller.current(), Screen::SupplierList);
}

#[test]
fn each_restore_flow_falls_back_once_its_pointer_is_spent() {
    let mut controller = signed_in(Role::Manager);

    controller.open_requests_list(None);
    controller.navigate_to_request_review("req-1");
    controller.navigate_to_supplier_invite(Some("req-1"));
    controller.return_from_supplier_invite();
    assert_eq!(controller.current(), Screen::RequestReview);
    assert_eq!(controller.state().previous(), None);
    controller.return_from_request_review();
    assert_eq!(controller.current(), Screen::ManagerDashboard);

    controller.navigate_to_supplier_detail("sup-1");
    controller.navigate_to_epi_configuration();
    controller.return_from_epi_configuration();
    controller.return_from_supplier_detail();
    assert_eq!(controller.current(), Screen::SupplierList);

    controller.open_dashboard();
    controller.navigate_to_supplier_invite(None);
    controller.navigate_to_supplier_detail("sup-2");
    controller.return_from_supplier_detail();
    controller.return_from_supplier_invite();
    assert_eq!(controller.current(), Screen::SupplierList);

    controller.open_requests_list(None);
    controller.navigate_to_epi_configuration();
    controller.navigate_to_request_review("req-2");
    controller.return_from_request_review();
    controller.return_from_epi_configuration();
    assert_eq!(controller.current(), Screen::ManagerDashboard);
}

#[test]
fn supplier_list_is_a_no_op_for_other_roles() {
    for role in [Role::Requester, Role::Approver, Role::Supplier, Role::Admin] {
        let mut controller = signed_in(role);
        let before = controller.state().clone();

        let transition = controller.open_supplier_list();
        assert_eq!(
            transition,
            Transition::Ignored {
                target: Screen::SupplierList,
                reason: IgnoreReason::Forbidden,
            }
        );
        assert_eq!(controller.state(), &before);
    }

    let mut manager = signed_in(Role::Manager);
    assert!(manager.open_supplier_list().moved());
    assert_eq!(manager.current(), Screen::SupplierList);
}

#[test]
fn supplier_list_is_ignored_when_signed_out() {
    let mut controller = NavigationController::default();
    assert_eq!(
        controller.open_supplier_list(),
        Transition::Ignored {
            target: Screen::SupplierList,
            reason: IgnoreReason::SignedOut,
        }
    );
}

#[test]
fn fallback_to_a_forbidden_screen_goes_home_instead() {
    let mut controller = signed_in(Role::Admin);
    controller.navigate_to_supplier_detail("sup-1");
    controller.navigate_to_epi_configuration();
    controller.return_from_epi_configuration();
    assert_eq!(controller.current(), Screen::SupplierDetail);

    controller.return_from_supplier_detail();
    assert_eq!(controller.current(), Screen::Dashboard);
}

#[test]
fn signed_out_controller_stays_on_public_screens() {
    let mut controller = NavigationController::default();

    assert_eq!(
        controller.open_dashboard(),
        Transition::Ignored {
            target: Screen::Dashboard,
            reason: IgnoreReason::SignedOut,
        }
    );
    assert!(!controller.navigate_to_request_review("req-1").moved());
    assert!(!controller.open_request_detail("req-1").moved());
    assert_eq!(controller.current(), Screen::SignIn);
    assert_eq!(controller.state().previous(), None);

    assert!(controller.open_sign_up().moved());
    assert!(controller.open_terms().moved());
    controller.back();
    assert_eq!(controller.current(), Screen::SignUp);
}

#[test]
fn custom_capability_table_gates_other_screens() {
    let table = CapabilityTable::default().restrict(Screen::EpiConfiguration, [Role::Admin]);
    let mut controller = NavigationController::new(table);
    controller.login(Role::Manager);

    assert!(!controller.navigate_to_epi_configuration().moved());
    assert_eq!(controller.state().previous(), None);
}

#[test]
fn static_back_targets_ignore_the_back_pointer() {
    let mut controller = signed_in(Role::Manager);
    controller.navigate_to_request_review("req-1");
    controller.return_from_request_review();

    controller.open_request_detail("req-1");
    controller.open_payment_tracking("req-1");

    controller.back();
    assert_eq!(controller.current(), Screen::RequestDetail);
    controller.back();
    assert_eq!(controller.current(), Screen::RequestsList);
    controller.back();
    assert_eq!(controller.current(), Screen::ManagerDashboard);
}

#[test]
fn generic_back_on_restore_screens_consumes_the_pointer() {
    let mut controller = signed_in(Role::Manager);
    controller.open_supplier_list();
    controller.navigate_to_supplier_detail("sup-3");

    controller.back();
    assert_eq!(controller.current(), Screen::SupplierList);
    assert_eq!(controller.state().previous(), None);
}

#[test]
fn carried_context_survives_until_cleared() {
    let mut controller = signed_in(Role::Requester);
    controller.open_requests_list(Some(RequestFilter::Approved));
    controller.open_request_detail("req-2");
    controller.back();

    assert_eq!(
        controller.state().context().request_filter,
        Some(RequestFilter::Approved)
    );
    assert_eq!(
        controller.state().context().selected_request_id.as_deref(),
        Some("req-2")
    );

    controller.clear_selected_request();
    controller.clear_request_filter();
    assert_eq!(controller.state().context().selected_request_id, None);
    assert_eq!(controller.state().context().request_filter, None);
}

#[test]
fn logout_resets_to_a_fresh_initial_state() {
    let mut controller = signed_in(Role::Manager);
    controller.navigate_to_supplier_detail("sup-1");
    controller.logout();

    assert_eq!(controller.current(), Screen::SignIn);
    assert_eq!(controller.state().previous(), None);
    assert_eq!(controller.state().context().selected_supplier_id, None);
    assert_eq!(controller.role(), None);
}

#[test]
fn every_transition_tears_down_the_current_view() {
    let mut controller = signed_in(Role::Supplier);
    let token = controller.view_token();

    controller.open_supplier_progress();
    assert!(token.is_stale());

    let token = controller.view_token();
    controller.open_supplier_list();
    assert!(!token.is_stale(), "ignored transitions keep the view alive");
}

#[test]
fn missing_carried_id_is_left_to_the_view() {
    let mut controller = signed_in(Role::Manager);
    controller.navigate_to_supplier_detail("");

    let target = controller.render_target();
    assert_eq!(target.screen, Screen::SupplierDetail);
    assert!(!target.is_complete());
}

#[test]
fn dispatch_routes_commands_to_named_transitions() {
    let mut controller = signed_in(Role::Manager);

    let transition = controller.dispatch(&NavigationCommand::RequestReview {
        request_id: "req-1".to_owned(),
    });
    assert!(transition.moved());
    assert_eq!(controller.current(), Screen::RequestReview);

    controller.dispatch(&NavigationCommand::Back);
    assert_eq!(controller.current(), Screen::ManagerDashboard);

    controller.dispatch(&NavigationCommand::ClearContext);
    assert_eq!(controller.state().context().review_request_id, None);
}
