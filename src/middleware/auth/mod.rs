/*
 * Responsibility
 * - authenticate : 「誰か」を決める (AuthCtx を付与, 拒否しない)
 * - guards       : 「許可されるか」を決める (route_layer, 401 で拒否)
 */
pub mod authenticate;
pub mod guards;
